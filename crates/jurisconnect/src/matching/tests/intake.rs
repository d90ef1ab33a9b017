use super::common::*;
use crate::matching::domain::{AreaSource, CaseSubmission, PracticeArea, Urgency};
use crate::matching::intake::{DescriptorBuilder, DescriptorError};

#[test]
fn builder_normalizes_location_and_defaults() {
    let descriptor = DescriptorBuilder::default()
        .build(submission())
        .expect("valid submission");

    assert_eq!(descriptor.state, "FL");
    assert_eq!(descriptor.city, "Miami");
    assert_eq!(descriptor.language, "pt");
    assert_eq!(descriptor.urgency, Urgency::High);
    assert_eq!(descriptor.practice_area, PracticeArea::Imigracao);
    assert_eq!(descriptor.area_source, AreaSource::Declared);
}

#[test]
fn builder_rejects_blank_descriptions() {
    let mut blank = submission();
    blank.description = "   \n".to_string();

    match DescriptorBuilder::default().build(blank) {
        Err(DescriptorError::MissingDescription) => {}
        other => panic!("expected missing description, got {other:?}"),
    }
}

#[test]
fn builder_rejects_malformed_state_codes() {
    let mut submission = submission();
    submission.state = Some("Fla".to_string());

    match DescriptorBuilder::default().build(submission) {
        Err(DescriptorError::InvalidState(state)) => assert_eq!(state, "FLA"),
        other => panic!("expected invalid state, got {other:?}"),
    }
}

#[test]
fn builder_parses_portuguese_urgency_labels() {
    let builder = DescriptorBuilder::default();

    let mut urgent = submission();
    urgent.urgency = Some("URGENTE".to_string());
    assert_eq!(
        builder.build(urgent).expect("valid").urgency,
        Urgency::Critical
    );

    let mut missing = submission();
    missing.urgency = None;
    assert_eq!(
        builder.build(missing).expect("valid").urgency,
        Urgency::Medium
    );

    let mut unknown = submission();
    unknown.urgency = Some("soon".to_string());
    assert!(matches!(
        builder.build(unknown),
        Err(DescriptorError::UnknownUrgency(raw)) if raw == "soon"
    ));
}

#[test]
fn builder_resolves_accented_and_prefixed_area_tags() {
    let builder = DescriptorBuilder::default();

    let mut accented = submission();
    accented.practice_area = Some("Imigração".to_string());
    assert_eq!(
        builder.build(accented).expect("valid").practice_area,
        PracticeArea::Imigracao
    );

    let mut prefixed = submission();
    prefixed.practice_area = Some("Direito de Família".to_string());
    assert_eq!(
        builder.build(prefixed).expect("valid").practice_area,
        PracticeArea::Familia
    );

    let mut english = submission();
    english.practice_area = Some("Real Estate".to_string());
    assert_eq!(
        builder.build(english).expect("valid").practice_area,
        PracticeArea::Imobiliario
    );
}

#[test]
fn builder_infers_area_from_description_when_unspecified() {
    let submission = CaseSubmission {
        description: "Preciso de ajuda com meu green card e o visto do meu filho".to_string(),
        practice_area: Some("outros".to_string()),
        ..CaseSubmission::default()
    };

    let descriptor = DescriptorBuilder::default()
        .build(submission)
        .expect("valid submission");

    assert_eq!(descriptor.practice_area, PracticeArea::Imigracao);
    assert_eq!(descriptor.area_source, AreaSource::Inferred);
}

#[test]
fn builder_leaves_area_unspecified_without_signals() {
    let submission = CaseSubmission {
        description: "Preciso de uma orientação geral".to_string(),
        ..CaseSubmission::default()
    };

    let descriptor = DescriptorBuilder::default()
        .build(submission)
        .expect("valid submission");

    assert_eq!(descriptor.practice_area, PracticeArea::Outros);
    assert_eq!(descriptor.area_source, AreaSource::Unspecified);
    assert!(descriptor.city.is_empty());
    assert!(descriptor.state.is_empty());
}

#[test]
fn builder_normalizes_language_tags() {
    let builder = DescriptorBuilder::default();

    let mut english = submission();
    english.language = Some("English".to_string());
    assert_eq!(builder.build(english).expect("valid").language, "en");

    let mut portuguese = submission();
    portuguese.language = Some("Português".to_string());
    assert_eq!(builder.build(portuguese).expect("valid").language, "pt");

    let spanish_default = DescriptorBuilder::with_default_language("espanhol");
    assert_eq!(
        spanish_default.build(submission()).expect("valid").language,
        "es"
    );
}

#[test]
fn phrase_keywords_respect_word_boundaries() {
    let describe = |description: &str| {
        DescriptorBuilder::default()
            .build(CaseSubmission {
                description: description.to_string(),
                ..CaseSubmission::default()
            })
            .expect("valid submission")
            .practice_area
    };

    assert_eq!(
        describe("Tenho uma pergunta sobre arte surreal estate moderna"),
        PracticeArea::Outros
    );
    assert_eq!(
        describe("Foi uma reunião em hora extraordinaria do conselho"),
        PracticeArea::Outros
    );
    assert_eq!(
        describe("Não recebi minha hora extra do mês passado"),
        PracticeArea::Trabalhista
    );
}
