// Archivo: engine.rs
// Propósito: implementar el `FlowEngine`, la máquina de estados que mueve un
// cursor sobre una secuencia fija de pasos y decide cuándo hay que enviar la
// decisión final.
//
// Nota: el motor no ejecuta side-effects. El envío al responder lo realiza
// `FlowService`, que llama a `begin_submission`/`complete_submission`.
use crate::domain::{FlowState, Transition};
use crate::errors::{FlowError, ResponderError, Result};
use log::{debug, info, warn};

/// Motor de un flujo secuencial.
///
/// Invariantes:
/// - `cursor` está siempre en `[0, step_count]` y nunca decrece.
/// - `cursor == step_count` sólo cuando se aceptó el último paso.
/// - Desde `Finished` no hay más transiciones.
#[derive(Debug, Clone)]
pub struct FlowEngine {
    step_count: usize,
    cursor: usize,
    state: FlowState,
    /// Número de envíos iniciados (incluye reintentos manuales).
    submissions: u32,
}

impl FlowEngine {
    /// Crea un motor para `step_count` pasos, situado en el paso 0.
    /// Retorna `Validation` si no hay pasos.
    pub fn new(step_count: usize) -> Result<Self> {
        if step_count == 0 {
            return Err(FlowError::Validation("un flujo necesita al menos un paso".into()));
        }
        Ok(Self { step_count,
                  cursor: 0,
                  state: FlowState::AtStep(0),
                  submissions: 0 })
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    /// Índice del paso actual, `None` si el motor ya está enviando o terminó.
    pub fn current_step(&self) -> Option<usize> {
        self.state.step_index()
    }

    /// Verdadero si el paso actual es el último de la secuencia.
    pub fn is_last_step(&self) -> bool {
        self.current_step().map(|i| i + 1 == self.step_count).unwrap_or(false)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Decisión pendiente de envío, si el motor está en `Submitting`.
    pub fn pending_decision(&self) -> Option<bool> {
        match self.state {
            FlowState::Submitting { accepted } => Some(accepted),
            _ => None,
        }
    }

    /// Avanza al siguiente paso.
    ///
    /// `step_complete` es el predicado de completitud del paso actual,
    /// evaluado por el llamador. Si es falso la transición se rechaza con
    /// `StepNotComplete` y el estado no cambia. En el último paso el motor
    /// entra en `Submitting { accepted: true }`.
    pub fn advance(&mut self, step_complete: bool) -> Result<Transition> {
        let index = match self.state {
            FlowState::AtStep(i) => i,
            FlowState::Finished { .. } => return Err(FlowError::Terminated),
            state => return Err(FlowError::InvalidTransition { state, action: "advance" }),
        };
        if !step_complete {
            debug!("advance rechazado: paso {} incompleto", index);
            return Err(FlowError::StepNotComplete(index));
        }
        let next = index + 1;
        if next < self.step_count {
            self.cursor = next;
            self.state = FlowState::AtStep(next);
            debug!("paso {} -> {}", index, next);
            Ok(Transition::Moved(next))
        } else {
            self.cursor = self.step_count;
            self.state = FlowState::Submitting { accepted: true };
            info!("último paso ({}) confirmado; decisión aceptada pendiente de envío", index);
            Ok(Transition::Submit { accepted: true })
        }
    }

    /// Cancela el flujo desde cualquier estado no terminal. El cursor no se
    /// modifica; la decisión pendiente pasa a `accepted = false`.
    pub fn cancel(&mut self) -> Result<Transition> {
        if self.state.is_terminal() {
            return Err(FlowError::Terminated);
        }
        info!("flujo cancelado desde {}", self.state);
        self.state = FlowState::Submitting { accepted: false };
        Ok(Transition::Submit { accepted: false })
    }

    /// Marca el inicio de un envío y devuelve la decisión a enviar.
    pub fn begin_submission(&mut self) -> Result<bool> {
        match self.state {
            FlowState::Submitting { accepted } => {
                self.submissions += 1;
                Ok(accepted)
            }
            FlowState::Finished { .. } => Err(FlowError::Terminated),
            state => Err(FlowError::InvalidTransition { state, action: "submit" }),
        }
    }

    /// Registra que el envío terminó bien: `Submitting` -> `Finished`.
    pub fn complete_submission(&mut self) -> Result<FlowState> {
        match self.state {
            FlowState::Submitting { accepted } => {
                self.state = FlowState::Finished { accepted };
                info!("decisión registrada (accepted={})", accepted);
                Ok(self.state)
            }
            FlowState::Finished { .. } => Err(FlowError::Terminated),
            state => Err(FlowError::InvalidTransition { state, action: "complete_submission" }),
        }
    }

    /// Registra un envío fallido. El estado se mantiene en `Submitting`.
    pub fn fail_submission(&mut self, error: &ResponderError) {
        warn!("envío fallido en {} (intento {}): {}", self.state, self.submissions, error);
    }
}
