use crate::errors::WorkflowError;
use crate::step::FlowStep;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Secuencias de pasos soportadas.
///
/// - `Full`: los 10 pasos, de la vista general al resumen final.
/// - `Classic`: vista general, datos personales, documentos, método de pago
///   y verificación bancaria.
/// - `Overview`: sólo la vista general; continuar en ella ya envía la
///   decisión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowPlan {
    #[default]
    Full,
    Classic,
    Overview,
}

impl FlowPlan {
    pub fn steps(&self) -> Vec<FlowStep> {
        match self {
            FlowPlan::Full => FlowStep::ALL.to_vec(),
            FlowPlan::Classic => vec![FlowStep::Overview,
                                      FlowStep::PersonalDetails,
                                      FlowStep::IdentityDocuments,
                                      FlowStep::PaymentMethod,
                                      FlowStep::BankVerification],
            FlowPlan::Overview => vec![FlowStep::Overview],
        }
    }
}

impl fmt::Display for FlowPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowPlan::Full => "full",
            FlowPlan::Classic => "classic",
            FlowPlan::Overview => "overview",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FlowPlan {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(FlowPlan::Full),
            "classic" => Ok(FlowPlan::Classic),
            "overview" => Ok(FlowPlan::Overview),
            other => Err(WorkflowError::Validation(format!("plan desconocido: '{}'", other))),
        }
    }
}
