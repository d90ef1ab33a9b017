use crate::infra::{load_pool, InMemoryLawyerPool};
use clap::Args;
use jurisconnect::config::AppConfig;
use jurisconnect::error::AppError;
use jurisconnect::matching::{
    CaseId, CaseMatchOutcome, CaseMatchingService, CaseSubmission, LawyerId, LeadSubmission,
    LeadView, MatchOrigin, MatchRequest,
};
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_LEAD_LAWYER: &str = "law-002";

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Free-text case description as written by the client
    pub(crate) description: String,
    /// Practice area slug or label (e.g. imigracao, "Direito de Família")
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Urgency: low, medium, high or critical
    #[arg(long)]
    pub(crate) urgency: Option<String>,
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Two-letter US state code
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) language: Option<String>,
    /// Lawyer ids already assigned to the case; may be repeated
    #[arg(long = "direct")]
    pub(crate) direct: Vec<String>,
    /// Maximum number of matches to return
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Lawyer roster CSV (defaults to APP_LAWYER_ROSTER, then the bundled sample)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Print the outcome as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Lawyer roster CSV (defaults to APP_LAWYER_ROSTER, then the bundled sample)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Matches shown per sample case
    #[arg(long, default_value_t = 3)]
    pub(crate) limit: usize,
    /// Skip the leads listing portion of the demo
    #[arg(long)]
    pub(crate) skip_leads: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        description,
        area,
        urgency,
        city,
        state,
        language,
        direct,
        limit,
        roster,
        json,
    } = args;

    let service = build_service(roster)?;
    let request = MatchRequest {
        case: CaseSubmission {
            description,
            practice_area: area,
            urgency,
            city,
            state,
            language,
        },
        direct_lawyer_ids: direct.into_iter().map(LawyerId).collect(),
        limit,
    };

    let outcome = service.match_case(request)?;
    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Match payload unavailable: {err}"),
        }
    } else {
        render_outcome(&outcome);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster,
        limit,
        skip_leads,
    } = args;

    let service = build_service(roster)?;

    println!("Case matching demo");
    for (label, case) in demo_cases() {
        println!("\n== {label} ==");
        let request = MatchRequest {
            case,
            direct_lawyer_ids: Vec::new(),
            limit: Some(limit),
        };
        match service.match_case(request) {
            Ok(outcome) => render_outcome(&outcome),
            Err(err) => println!("  Matching failed: {err}"),
        }
    }

    if skip_leads {
        return Ok(());
    }

    let lawyer_id = LawyerId(DEMO_LEAD_LAWYER.to_string());
    let leads = demo_cases()
        .into_iter()
        .enumerate()
        .map(|(index, (_, case))| LeadSubmission {
            case_id: CaseId(format!("case-{:03}", index + 1)),
            case,
        })
        .collect();

    println!("\n== Leads listing for {lawyer_id} ==");
    match service.rank_leads(&lawyer_id, leads) {
        Ok(views) => render_leads(&views),
        Err(err) => println!("  Leads unavailable: {err}"),
    }

    Ok(())
}

fn build_service(
    roster: Option<PathBuf>,
) -> Result<CaseMatchingService<InMemoryLawyerPool>, AppError> {
    let config = AppConfig::load()?;
    let path = roster.or(config.lawyer_roster);
    let pool = load_pool(path.as_deref())?;
    println!(
        "Lawyer pool: {} profiles ({})",
        pool.len(),
        path.as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "bundled sample".to_string())
    );
    let eligible = pool
        .snapshot()
        .iter()
        .filter(|lawyer| lawyer.is_eligible())
        .count();
    println!("Eligible (active and verified): {eligible}");

    Ok(CaseMatchingService::new(Arc::new(pool), config.matching))
}

fn demo_cases() -> Vec<(&'static str, CaseSubmission)> {
    vec![
        (
            "Immigration, declared area, high urgency",
            CaseSubmission {
                description: "Meu visto de estudante vence em três semanas e preciso entender \
                              se consigo trocar para um visto de trabalho sem sair do país."
                    .to_string(),
                practice_area: Some("imigracao".to_string()),
                urgency: Some("high".to_string()),
                city: Some("Miami".to_string()),
                state: Some("FL".to_string()),
                language: Some("pt".to_string()),
            },
        ),
        (
            "Criminal, inferred from description, critical",
            CaseSubmission {
                description: "Meu irmão foi preso ontem em Newark e ainda não conseguiu falar \
                              com ninguém."
                    .to_string(),
                urgency: Some("critical".to_string()),
                city: Some("Newark".to_string()),
                state: Some("NJ".to_string()),
                ..CaseSubmission::default()
            },
        ),
        (
            "General question, no area or location",
            CaseSubmission {
                description: "Quero uma orientação geral antes de assinar um documento.".to_string(),
                urgency: Some("low".to_string()),
                ..CaseSubmission::default()
            },
        ),
    ]
}

fn render_outcome(outcome: &CaseMatchOutcome) {
    let descriptor = &outcome.descriptor;
    let metadata = &outcome.report.metadata;

    println!(
        "Case: area {} ({:?}) | urgency {} | quality {} ({})",
        descriptor.practice_area.slug(),
        descriptor.area_source,
        descriptor.urgency.label(),
        outcome.quality_score.value(),
        outcome.quality_score.tier().label()
    );
    println!(
        "Matches: {} direct, {} ranked | {} | generated {}",
        metadata.direct_count,
        metadata.algorithm_count,
        metadata.algorithm_version,
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if outcome.report.is_empty() {
        println!("  No eligible lawyers found");
        return;
    }

    for (position, result) in outcome.report.matches.iter().enumerate() {
        let name = result.lawyer.name.as_deref().unwrap_or("(unnamed)");
        let fee = result
            .consultation_fee
            .map(|fee| format!("${fee}"))
            .unwrap_or_else(|| "n/a".to_string());
        let origin = match result.origin {
            MatchOrigin::Direct => " [direct]",
            MatchOrigin::Algorithm => "",
        };
        println!(
            "  {:>2}. {} {} | {}, {} | score {:.2} | est. success {:.0}% | fee {}{}",
            position + 1,
            result.lawyer.id,
            name,
            result.lawyer.city,
            result.lawyer.state,
            result.score,
            result.estimated_success * 100.0,
            fee,
            origin
        );
        for reason in &result.match_reasons {
            println!("      - {reason}");
        }
    }
}

fn render_leads(views: &[LeadView]) {
    if views.is_empty() {
        println!("  No open leads");
        return;
    }

    for view in views {
        println!(
            "  {} | {} | urgency {} | quality {} ({}) | fit {:.2}",
            view.case_id,
            view.practice_area.slug(),
            view.urgency.label(),
            view.quality_score.value(),
            view.quality_tier.label(),
            view.match_score
        );
    }
}
