use std::sync::Arc;

use super::common::*;
use crate::matching::domain::{CaseId, CaseSubmission, LawyerId, PracticeArea, Urgency};
use crate::matching::intake::DescriptorError;
use crate::matching::leads::LeadSubmission;
use crate::matching::pool::{PoolError, PoolFilter};
use crate::matching::scoring::{MatchOrigin, MatchingConfig};
use crate::matching::service::{CaseMatchingService, MatchRequest, MatchingServiceError};

fn request() -> MatchRequest {
    MatchRequest {
        case: submission(),
        ..MatchRequest::default()
    }
}

fn lead(case_id: &str, area: &str, urgency: &str) -> LeadSubmission {
    LeadSubmission {
        case_id: CaseId(case_id.to_string()),
        case: CaseSubmission {
            practice_area: Some(area.to_string()),
            urgency: Some(urgency.to_string()),
            ..submission()
        },
    }
}

#[test]
fn match_case_fetches_with_descriptor_filter() {
    let (service, pool) = build_service(roster());

    let outcome = service.match_case(request()).expect("matching succeeds");

    assert_eq!(
        pool.filters(),
        vec![PoolFilter {
            practice_area: Some(PracticeArea::Imigracao),
            ..PoolFilter::default()
        }]
    );
    assert_eq!(outcome.descriptor.urgency, Urgency::High);
    assert_eq!(outcome.descriptor.state, "FL");
    assert_eq!(outcome.quality_score.value(), 100);
    assert_eq!(outcome.report.matches[0].lawyer.id.0, "law-featured");
    assert_eq!(outcome.report.metadata.direct_count, 0);
    assert_eq!(outcome.report.metadata.algorithm_count, 4);
}

#[test]
fn restrict_to_state_narrows_the_fetch() {
    let pool = Arc::new(MemoryPool::new(roster()));
    let config = MatchingConfig {
        restrict_to_state: true,
        ..MatchingConfig::default()
    };
    let service = CaseMatchingService::new(pool.clone(), config);

    let outcome = service.match_case(request()).expect("matching succeeds");

    assert_eq!(pool.filters()[0].state.as_deref(), Some("FL"));
    assert!(outcome
        .report
        .matches
        .iter()
        .all(|result| result.lawyer.state == "FL"));
}

#[test]
fn unspecified_area_fetches_without_area_filter() {
    let (service, pool) = build_service(roster());
    let request = MatchRequest {
        case: CaseSubmission {
            description: "Preciso de uma orientação geral sobre meus direitos aqui.".to_string(),
            ..CaseSubmission::default()
        },
        ..MatchRequest::default()
    };

    let outcome = service.match_case(request).expect("matching succeeds");

    assert_eq!(pool.filters()[0].practice_area, None);
    assert_eq!(outcome.descriptor.practice_area, PracticeArea::Outros);
    assert_eq!(outcome.report.matches.len(), 5);
}

#[test]
fn pool_errors_surface_unchanged() {
    let service =
        CaseMatchingService::new(Arc::new(UnavailablePool), MatchingConfig::default());

    match service.match_case(request()) {
        Err(MatchingServiceError::Pool(PoolError::Unavailable(message))) => {
            assert_eq!(message, "database offline");
        }
        other => panic!("expected pool error, got {other:?}"),
    }
}

#[test]
fn invalid_submission_is_rejected_before_fetch() {
    let (service, pool) = build_service(roster());
    let request = MatchRequest {
        case: CaseSubmission {
            description: "   ".to_string(),
            ..submission()
        },
        ..MatchRequest::default()
    };

    let error = service.match_case(request).expect_err("blank description rejected");

    assert!(matches!(
        error,
        MatchingServiceError::InvalidDescriptor(DescriptorError::MissingDescription)
    ));
    assert!(pool.filters().is_empty());
}

#[test]
fn direct_assignments_lead_and_skip_unknown_or_ineligible() {
    let (service, _pool) = build_service(roster());
    let request = MatchRequest {
        direct_lawyer_ids: vec![
            LawyerId("law-boston".to_string()),
            LawyerId("law-ghost".to_string()),
            LawyerId("law-inactive".to_string()),
        ],
        ..request()
    };

    let report = service.match_case(request).expect("matching succeeds").report;

    assert_eq!(report.matches[0].lawyer.id.0, "law-boston");
    assert_eq!(report.matches[0].origin, MatchOrigin::Direct);
    assert_eq!(
        report.matches[0].match_reasons[0],
        "directly assigned to this case"
    );
    assert_eq!(report.metadata.direct_count, 1);
    assert_eq!(report.metadata.algorithm_count, 3);
    assert_eq!(
        report
            .matches
            .iter()
            .filter(|result| result.lawyer.id.0 == "law-boston")
            .count(),
        1
    );
    assert!(report
        .matches
        .iter()
        .all(|result| result.lawyer.id.0 != "law-inactive"));
}

#[test]
fn engine_filters_pools_that_ignore_the_query() {
    let service = CaseMatchingService::new(Arc::new(LeakyPool(roster())), MatchingConfig::default());

    let report = service.match_case(request()).expect("matching succeeds").report;

    let mut found = ids(&report.matches);
    found.sort_unstable();
    assert_eq!(
        found,
        vec!["law-boston", "law-featured", "law-orlando", "law-rookie"]
    );
}

#[test]
fn empty_pool_is_not_an_error() {
    let (service, _pool) = build_service(Vec::new());

    let outcome = service.match_case(request()).expect("empty pool is fine");

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.quality_score.value(), 100);
}

#[test]
fn request_limit_overrides_default() {
    let (service, _pool) = build_service(roster());
    let request = MatchRequest {
        limit: Some(1),
        ..request()
    };

    let report = service.match_case(request).expect("matching succeeds").report;

    assert_eq!(ids(&report.matches), vec!["law-featured"]);
}

#[test]
fn match_lawyers_ranks_explicit_snapshot() {
    let (service, pool) = build_service(Vec::new());
    let descriptor = service.describe(submission()).expect("valid submission");

    let report = service.match_lawyers(&descriptor, &roster(), Some(2));

    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.matches[0].lawyer.id.0, "law-featured");
    assert!(pool.filters().is_empty());
}

#[test]
fn leads_order_by_urgency_then_fit() {
    let (service, _pool) = build_service(roster());
    let mut blank = lead("case-blank", "imigracao", "high");
    blank.case.description = String::new();

    let views = service
        .rank_leads(
            &LawyerId("law-orlando".to_string()),
            vec![
                lead("case-low", "imigracao", "low"),
                lead("case-family", "familia", "critical"),
                blank,
                lead("case-visa", "imigracao", "high"),
                lead("case-tax", "tributario", "high"),
            ],
        )
        .expect("lawyer exists");

    let order: Vec<&str> = views.iter().map(|view| view.case_id.0.as_str()).collect();
    assert_eq!(
        order,
        vec!["case-family", "case-visa", "case-tax", "case-low"]
    );
    assert!(views[1].match_score > views[2].match_score);
    assert_eq!(views[0].quality_score.value(), 100);
}

#[test]
fn leads_for_unknown_or_ineligible_lawyer_fail() {
    let (service, _pool) = build_service(roster());

    for id in ["law-ghost", "law-inactive", "law-unverified"] {
        let error = service
            .rank_leads(&LawyerId(id.to_string()), Vec::new())
            .expect_err("lawyer rejected");
        assert!(matches!(error, MatchingServiceError::LawyerNotFound(ref missing) if missing.0 == id));
    }
}
