use crate::errors::WorkflowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pasos del flujo de consentimiento, en su orden canónico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStep {
    #[serde(rename = "overview")]
    Overview,
    #[serde(rename = "personal-details")]
    PersonalDetails,
    #[serde(rename = "identity-documents")]
    IdentityDocuments,
    #[serde(rename = "payment-method")]
    PaymentMethod,
    #[serde(rename = "bank-verification")]
    BankVerification,
    #[serde(rename = "newsletter")]
    Newsletter,
    #[serde(rename = "legal-terms")]
    LegalTerms,
    #[serde(rename = "term-document-1")]
    TermDocument1,
    #[serde(rename = "term-document-2")]
    TermDocument2,
    #[serde(rename = "final-overview")]
    FinalOverview,
}

impl FlowStep {
    pub const ALL: [FlowStep; 10] = [FlowStep::Overview,
                                     FlowStep::PersonalDetails,
                                     FlowStep::IdentityDocuments,
                                     FlowStep::PaymentMethod,
                                     FlowStep::BankVerification,
                                     FlowStep::Newsletter,
                                     FlowStep::LegalTerms,
                                     FlowStep::TermDocument1,
                                     FlowStep::TermDocument2,
                                     FlowStep::FinalOverview];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStep::Overview => "overview",
            FlowStep::PersonalDetails => "personal-details",
            FlowStep::IdentityDocuments => "identity-documents",
            FlowStep::PaymentMethod => "payment-method",
            FlowStep::BankVerification => "bank-verification",
            FlowStep::Newsletter => "newsletter",
            FlowStep::LegalTerms => "legal-terms",
            FlowStep::TermDocument1 => "term-document-1",
            FlowStep::TermDocument2 => "term-document-2",
            FlowStep::FinalOverview => "final-overview",
        }
    }

    /// Título de la pantalla. La vista general no tiene título fijo: usa el
    /// nombre del solicitante.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            FlowStep::Overview => None,
            FlowStep::PersonalDetails => Some("Personal details"),
            FlowStep::IdentityDocuments => Some("Identity documents"),
            FlowStep::PaymentMethod => Some("Payment method"),
            FlowStep::BankVerification => Some("Bank verification"),
            FlowStep::Newsletter => Some("Newsletter"),
            FlowStep::LegalTerms => Some("Legal terms"),
            FlowStep::TermDocument1 => Some("Privacy policy"),
            FlowStep::TermDocument2 => Some("Terms & conditions"),
            FlowStep::FinalOverview => Some("Overview"),
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FlowStep {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        FlowStep::ALL.iter()
                     .copied()
                     .find(|step| step.as_str() == needle)
                     .ok_or_else(|| WorkflowError::Validation(format!("paso desconocido: '{}'", s)))
    }
}
