use crate::infra::{InMemoryLeadRepository, InMemorySessionStore};
use candidacy_funnel::error::AppError;
use candidacy_funnel::funnel::leads::{ContactForm, LeadCaptureService};
use candidacy_funnel::funnel::quiz::{
    classify_with_trace, AnswerMap, AnswerSheet, JsonFileStore, QuizCatalog, QuizSession,
    ResultTier, SessionId, SessionStore, StepIndex,
};
use candidacy_funnel::funnel::results::{case_study_for_persona, content_for};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// JSON file mapping step numbers to answer values, e.g. {"1": "crown", "7": "yes"}
    pub(crate) answers: PathBuf,
    /// Print a per-step readout of how each answer was interpreted
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Persist demo sessions under this directory instead of process memory
    #[arg(long, value_name = "DIR")]
    pub(crate) storage_dir: Option<PathBuf>,
    /// Skip the contact capture portion of the demo
    #[arg(long)]
    pub(crate) skip_capture: bool,
    /// Print the lead CSV export at the end of the run
    #[arg(long)]
    pub(crate) export: bool,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.answers)?;
    let answers: AnswerMap = serde_json::from_str(&raw)?;

    if args.explain {
        let catalog = QuizCatalog::standard();
        println!("Answer sheet readout");
        for (step, value) in &answers {
            match catalog.question(*step) {
                Some(question) if catalog.is_known_value(*step, value) => {
                    println!("- step {step} ({}): {value}", question.title);
                }
                Some(question) => {
                    println!(
                        "- step {step} ({}): {value} (not a recognized answer)",
                        question.title
                    );
                }
                None => println!("- step {step}: {value} (outside the quiz)"),
            }
        }
    }

    let classification = classify_with_trace(&answers);
    let content = content_for(classification.tier);

    println!("Tier: {}", classification.tier.label());
    println!("Rule: {}", classification.rule.describe());
    println!("Next step: {}", content.cta.label);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    match args.storage_dir.clone() {
        Some(dir) => walk_funnel(Arc::new(JsonFileStore::new(dir)), args),
        None => walk_funnel(Arc::new(InMemorySessionStore::default()), args),
    }
}

fn walk_funnel<S>(store: Arc<S>, args: DemoArgs) -> Result<(), AppError>
where
    S: SessionStore + 'static,
{
    let catalog = QuizCatalog::standard();

    println!("Candidacy funnel demo");
    println!("\nQuiz steps");
    for question in catalog.questions() {
        let optional = if question.optional { ", optional" } else { "" };
        println!(
            "- {}. {} ({} options{optional})",
            question.step,
            question.title,
            question.options.len()
        );
    }

    println!("\nResume after restart");
    let resumed_id = SessionId::new("demo-resume");
    let mut opening = QuizSession::start(store.clone(), resumed_id.clone());
    for (step, value) in [(1u8, "diffuse"), (2, "6_to_12_months")] {
        if let Err(err) = opening.set_answer(step, value) {
            println!("  answer rejected: {err}");
        }
        if let Err(err) = opening.set_current_step(step + 1) {
            println!("  cursor not moved: {err}");
        }
    }
    drop(opening);
    let resumed = QuizSession::resume_or_start(store.clone(), resumed_id);
    println!(
        "- session {} came back on step {} with {} answers",
        resumed.id(),
        resumed.current_step(),
        resumed.answers().len()
    );

    let visitors: [(&str, &[(StepIndex, &str)]); 3] = [
        (
            "demo-early-crown",
            &[
                (1, "crown"),
                (2, "under_6_months"),
                (3, "accelerating"),
                (4, "nothing"),
                (5, "regrow"),
                (6, "male_early"),
                (7, "yes"),
            ],
        ),
        (
            "demo-second-year-plateau",
            &[
                (1, "hairline"),
                (2, "1_to_2_years"),
                (3, "stable"),
                (4, "minoxidil"),
                (5, "stop_loss"),
                (6, "stressed"),
                (7, "maybe"),
            ],
        ),
        (
            "demo-patchy-loss",
            &[
                (1, "patches"),
                (2, "over_2_years"),
                (3, "stable"),
                (4, "multiple"),
                (5, "confidence"),
                (6, "other"),
                (7, "no"),
            ],
        ),
    ];

    let mut ideal_walk: Option<(SessionId, AnswerMap)> = None;

    for (name, script) in visitors {
        let mut session = QuizSession::start(store.clone(), SessionId::new(name));

        println!("\nVisitor {name}");
        for (step, value) in script.iter().copied() {
            if !catalog.is_known_value(step, value) {
                println!("  skipping step {step}: {value} is not a recognized answer");
                continue;
            }
            match session.set_answer(step, value) {
                Ok(saved) if !saved.is_durable() => {
                    println!("  warning: step {step} answer not persisted");
                }
                Ok(_) => {}
                Err(err) => {
                    println!("  answer rejected: {err}");
                    continue;
                }
            }
            if let Err(err) = session.set_current_step(step + 1) {
                println!("  cursor not moved: {err}");
            }
        }

        let classification = session.classification();
        let content = content_for(classification.tier);
        println!(
            "  -> {} ({})",
            classification.tier.label(),
            classification.rule.describe()
        );
        println!("  result page: {}", content.title);
        println!("  call to action: {}", content.cta.label);

        let sheet = AnswerSheet::new(session.answers());
        if let Some(study) = sheet.persona().and_then(case_study_for_persona) {
            println!(
                "  case study: {} ({}): {} {}",
                study.name, study.age, study.statistic_value, study.statistic_label
            );
        }

        if classification.tier == ResultTier::Ideal && ideal_walk.is_none() {
            ideal_walk = Some((session.id().clone(), session.answers().clone()));
        }
    }

    if args.skip_capture {
        return Ok(());
    }

    println!("\nContact capture");
    let repository = Arc::new(InMemoryLeadRepository::default());
    let service = LeadCaptureService::new(repository);

    let (session_id, answers) = match ideal_walk {
        Some(walk) => walk,
        None => (SessionId::new("demo-empty"), AnswerMap::new()),
    };

    let form = ContactForm {
        email: "casey.reed@example.com".to_string(),
        phone: "+1 (515) 555-0134".to_string(),
        email_consent: true,
        phone_consent: false,
        privacy_acknowledged: true,
    };
    match service.submit(&session_id, &answers, &form) {
        Ok(outcome) => println!(
            "- captured {} as {} (stored: {})",
            outcome.lead_id.0,
            outcome.result_tier.label(),
            outcome.stored
        ),
        Err(violations) => println!("- capture rejected: {violations}"),
    }

    let blank = ContactForm {
        email: String::new(),
        phone: String::new(),
        email_consent: false,
        phone_consent: false,
        privacy_acknowledged: false,
    };
    if let Err(violations) = service.submit(&session_id, &answers, &blank) {
        println!("- a blank form surfaces every inline message:");
        for violation in &violations.0 {
            println!("    {}: {}", violation.field(), violation.message());
        }
    }

    match service.recent_leads(10) {
        Ok(leads) => {
            println!("\nRecent leads");
            for lead in leads {
                println!("- {} [{}] {}", lead.lead_id.0, lead.result_tier, lead.email);
            }
        }
        Err(err) => println!("\nRecent leads unavailable: {err}"),
    }

    if args.export {
        match service.export_csv() {
            Ok(csv) => {
                println!("\nLead export");
                print!("{csv}");
            }
            Err(err) => println!("\nLead export unavailable: {err}"),
        }
    }

    Ok(())
}
