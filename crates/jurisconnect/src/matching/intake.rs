use std::collections::BTreeSet;

use super::domain::{AreaSource, CaseDescriptor, CaseSubmission, PracticeArea, Urgency};

/// Validation errors raised while building a case descriptor.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("case description is required")]
    MissingDescription,
    #[error("state must be a two-letter code, found {0:?}")]
    InvalidState(String),
    #[error("unknown urgency level {0:?}")]
    UnknownUrgency(String),
}

pub(crate) const DEFAULT_LANGUAGE: &str = "pt";

const AREA_ALIASES: &[(&str, PracticeArea)] = &[
    ("immigration", PracticeArea::Imigracao),
    ("imigratorio", PracticeArea::Imigracao),
    ("family", PracticeArea::Familia),
    ("divorcio", PracticeArea::Familia),
    ("criminal defense", PracticeArea::Criminal),
    ("penal", PracticeArea::Criminal),
    ("employment", PracticeArea::Trabalhista),
    ("labor", PracticeArea::Trabalhista),
    ("trabalho", PracticeArea::Trabalhista),
    ("business", PracticeArea::Empresarial),
    ("corporate", PracticeArea::Empresarial),
    ("real estate", PracticeArea::Imobiliario),
    ("imobiliaria", PracticeArea::Imobiliario),
    ("tax", PracticeArea::Tributario),
    ("social security", PracticeArea::Previdenciario),
    ("consumer", PracticeArea::Consumidor),
    ("consumer protection", PracticeArea::Consumidor),
    ("other", PracticeArea::Outros),
    ("geral", PracticeArea::Outros),
];

const AREA_KEYWORDS: &[(PracticeArea, &[&str])] = &[
    (
        PracticeArea::Imigracao,
        &[
            "visto",
            "visa",
            "green card",
            "imigracao",
            "immigration",
            "asilo",
            "asylum",
            "deportacao",
            "deportation",
            "cidadania",
            "citizenship",
            "uscis",
        ],
    ),
    (
        PracticeArea::Familia,
        &[
            "divorcio",
            "divorce",
            "guarda",
            "custody",
            "pensao alimenticia",
            "child support",
            "casamento",
            "adocao",
        ],
    ),
    (
        PracticeArea::Criminal,
        &["criminal", "preso", "prisao", "arrest", "dui", "crime"],
    ),
    (
        PracticeArea::Trabalhista,
        &[
            "demissao",
            "salario",
            "hora extra",
            "overtime",
            "wage",
            "patrao",
            "employer",
        ],
    ),
    (
        PracticeArea::Empresarial,
        &["empresa", "llc", "socio", "business", "contrato social"],
    ),
    (
        PracticeArea::Imobiliario,
        &[
            "imovel",
            "aluguel",
            "landlord",
            "despejo",
            "eviction",
            "hipoteca",
            "mortgage",
            "real estate",
        ],
    ),
    (
        PracticeArea::Civil,
        &["indenizacao", "acidente", "accident", "heranca", "inventario"],
    ),
    (
        PracticeArea::Tributario,
        &["imposto", "irs", "tax", "receita federal"],
    ),
    (
        PracticeArea::Previdenciario,
        &["aposentadoria", "inss", "social security", "retirement"],
    ),
    (
        PracticeArea::Consumidor,
        &["consumidor", "consumer", "reembolso", "refund"],
    ),
];

/// Builds `CaseDescriptor` instances from raw submissions.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    default_language: String,
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::with_default_language(DEFAULT_LANGUAGE)
    }
}

impl DescriptorBuilder {
    pub fn with_default_language(language: &str) -> Self {
        let normalized = normalize_language(language);
        let default_language = if normalized.is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            normalized
        };

        Self { default_language }
    }

    pub fn build(&self, submission: CaseSubmission) -> Result<CaseDescriptor, DescriptorError> {
        let description = submission.description.trim().to_string();
        if description.is_empty() {
            return Err(DescriptorError::MissingDescription);
        }

        let state = submission
            .state
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_ascii_uppercase();
        if !state.is_empty() && !is_state_code(&state) {
            return Err(DescriptorError::InvalidState(state));
        }

        let urgency = match submission.urgency.as_deref().map(str::trim) {
            None | Some("") => Urgency::default(),
            Some(raw) => parse_urgency(raw)
                .ok_or_else(|| DescriptorError::UnknownUrgency(raw.to_string()))?,
        };

        let city = submission
            .city
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let language = submission
            .language
            .as_deref()
            .map(normalize_language)
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| self.default_language.clone());

        let declared = submission
            .practice_area
            .as_deref()
            .and_then(resolve_area_tag)
            .filter(|area| area.is_specific());

        let (practice_area, area_source) = match declared {
            Some(area) => (area, AreaSource::Declared),
            None => match infer_area(&description) {
                Some(area) => (area, AreaSource::Inferred),
                None => (PracticeArea::Outros, AreaSource::Unspecified),
            },
        };

        Ok(CaseDescriptor {
            description,
            practice_area,
            area_source,
            urgency,
            city,
            state,
            language,
        })
    }
}

pub(crate) fn parse_urgency(raw: &str) -> Option<Urgency> {
    match fold(raw).as_str() {
        "low" | "baixa" => Some(Urgency::Low),
        "medium" | "media" | "normal" => Some(Urgency::Medium),
        "high" | "alta" => Some(Urgency::High),
        "critical" | "critica" | "urgente" => Some(Urgency::Critical),
        _ => None,
    }
}

/// Resolve a declared practice-area tag (slug, alias, or "direito de ..." phrasing).
pub(crate) fn resolve_area_tag(raw: &str) -> Option<PracticeArea> {
    let folded = fold(raw);
    let tag = ["direito de ", "direito do ", "direito da ", "direito "]
        .iter()
        .find_map(|prefix| folded.strip_prefix(prefix))
        .unwrap_or(folded.as_str())
        .trim();

    if tag.is_empty() {
        return None;
    }

    PracticeArea::from_slug(tag).or_else(|| {
        AREA_ALIASES
            .iter()
            .find(|(alias, _)| *alias == tag)
            .map(|(_, area)| *area)
    })
}

/// Keyword vote over the description; ties resolve to the first area listed.
pub(crate) fn infer_area(description: &str) -> Option<PracticeArea> {
    let folded = fold(description);
    let tokens: BTreeSet<&str> = folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();
    let phrase_text = format!(" {} ", tokens_joined(&folded));

    let mut best: Option<(PracticeArea, usize)> = None;
    for (area, keywords) in AREA_KEYWORDS {
        let hits = keywords
            .iter()
            .filter(|keyword| {
                if keyword.contains(' ') {
                    phrase_text.contains(&format!(" {keyword} "))
                } else {
                    tokens.contains(*keyword)
                }
            })
            .count();

        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((*area, hits));
        }
    }

    best.map(|(area, _)| area)
}

pub(crate) fn normalize_language(raw: &str) -> String {
    let folded = fold(raw);
    match folded.as_str() {
        "pt" | "pt-br" | "pt_br" | "portugues" | "portuguese" => "pt".to_string(),
        "en" | "en-us" | "english" | "ingles" => "en".to_string(),
        "es" | "spanish" | "espanhol" | "espanol" => "es".to_string(),
        _ => folded,
    }
}

fn is_state_code(state: &str) -> bool {
    state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic())
}

fn tokens_joined(folded: &str) -> String {
    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case and strip Portuguese diacritics.
pub(crate) fn fold(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
