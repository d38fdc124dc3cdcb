// Archivo: transaction_flow.rs
// Propósito: sesión de consentimiento sobre una transacción. Une el motor de
// pasos (`flow::FlowEngine`), el servicio de envío, las respuestas del
// usuario y el generador de pantallas.
use crate::errors::{Result, WorkflowError};
use crate::plan::FlowPlan;
use crate::renderer::{ContentRenderer, ScreenRenderer};
use crate::step::{template, AcceptanceTracker, Completion, FlowInputs, FlowStep, NoticeKind, ScreenContent, StepInputs};
use consent_domain::{ItemId, LineItem, Transaction};
use flow::{FlowEngine, FlowService, FlowState, NavigationIntent, Responder, SubmissionPolicy, SubmissionReceipt,
           Transition};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

/// Intención de navegación que devuelve el flujo.
pub type Navigation = NavigationIntent<ScreenContent>;

/// Sesión de un flujo de consentimiento.
///
/// La transacción pertenece en exclusiva a la sesión. Las operaciones que
/// envían la decisión toman `&mut self` durante todo el envío, de modo que no
/// es posible ninguna otra transición mientras hay un envío en curso.
pub struct TransactionFlow<R>
    where R: Responder + ?Sized
{
    transaction: Transaction,
    steps: Vec<FlowStep>,
    engine: FlowEngine,
    inputs: FlowInputs,
    service: FlowService<R>,
    renderer: Arc<dyn ScreenRenderer>,
    receipt: Option<SubmissionReceipt>,
}

impl<R> TransactionFlow<R> where R: Responder + ?Sized
{
    /// Crea el flujo con el plan indicado y la política de envío por defecto.
    pub fn new(transaction: Transaction, plan: FlowPlan, responder: Arc<R>) -> Result<Self> {
        Self::with_steps(transaction, plan.steps(), responder, SubmissionPolicy::default())
    }

    /// Crea el flujo con una secuencia de pasos explícita. La secuencia no
    /// puede estar vacía ni repetir pasos.
    pub fn with_steps(transaction: Transaction,
                      steps: Vec<FlowStep>,
                      responder: Arc<R>,
                      policy: SubmissionPolicy)
                      -> Result<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = steps.iter().find(|s| !seen.insert(**s)) {
            return Err(WorkflowError::Validation(format!("paso repetido en el plan: {}", dup)));
        }
        let engine = FlowEngine::new(steps.len())?;
        let inputs: FlowInputs = steps.iter().map(|s| (*s, StepInputs::from_template(template(*s)))).collect();
        info!("flujo abierto para {} con {} pasos", transaction.transaction_id(), steps.len());
        Ok(Self { transaction,
                  steps,
                  engine,
                  inputs,
                  service: FlowService::new(responder, policy),
                  renderer: Arc::new(ContentRenderer::new()),
                  receipt: None })
    }

    /// Sustituye el generador de pantallas.
    pub fn with_renderer(mut self, renderer: Arc<dyn ScreenRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn steps(&self) -> &[FlowStep] {
        &self.steps
    }

    pub fn state(&self) -> FlowState {
        self.engine.state()
    }

    pub fn cursor(&self) -> usize {
        self.engine.cursor()
    }

    pub fn is_finished(&self) -> bool {
        self.engine.is_terminal()
    }

    /// Comprobante del envío, una vez registrada la decisión.
    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn inputs(&self, step: FlowStep) -> Option<&StepInputs> {
        self.inputs.get(&step)
    }

    pub fn current_step(&self) -> Option<FlowStep> {
        self.engine.current_step().and_then(|i| self.steps.get(i).copied())
    }

    /// Pantalla del paso actual; `None` si el flujo está enviando o terminó.
    pub fn current_screen(&self) -> Option<ScreenContent> {
        self.current_step().map(|s| self.render(s))
    }

    /// Predicado de completitud del paso actual.
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            Some(step) => match self.inputs.get(&step) {
                Some(inputs) => template(step).is_complete(&self.transaction, inputs),
                None => false,
            },
            None => false,
        }
    }

    /// Cambia la aceptación de un item del paso actual y devuelve la
    /// condición recalculada.
    pub fn set_accepted(&mut self, id: ItemId, accepted: bool) -> Result<bool> {
        let items = self.current_items_mut(&id.to_string())?;
        AcceptanceTracker::new(items).set_accepted(id, accepted)
    }

    /// Variante por nombre: cambia el primer item con ese nombre.
    pub fn set_accepted_by_name(&mut self, name: &str, accepted: bool) -> Result<bool> {
        let items = self.current_items_mut(name)?;
        AcceptanceTracker::new(items).set_accepted_by_name(name, accepted)
    }

    /// Verdadero si todos los items de la transacción están aceptados, sea
    /// cual sea el paso actual.
    pub fn all_accepted(&self) -> bool {
        crate::step::gate(self.transaction.line_items())
    }

    /// Condición de aceptación de los items del paso actual (los de la
    /// transacción o los propios del paso). Verdadero si el paso no tiene
    /// items.
    pub fn current_step_accepted(&self) -> bool {
        self.current_items().map(crate::step::gate).unwrap_or(true)
    }

    /// Rellena el campo `index` del formulario del paso actual.
    pub fn fill_field(&mut self, index: usize, text: &str) -> Result<()> {
        self.current_inputs_mut()?.fill(index, text)
    }

    /// Elige la opción `index` del paso actual.
    pub fn select_option(&mut self, index: usize) -> Result<()> {
        self.current_inputs_mut()?.select(index)
    }

    /// Abre el detalle de un aviso sin mover el cursor.
    pub fn open_notice(&self, kind: NoticeKind) -> Result<Navigation> {
        if self.engine.is_terminal() {
            return Err(flow::FlowError::Terminated.into());
        }
        Ok(NavigationIntent::PushDetail(self.renderer.render_notice(kind, &self.transaction)))
    }

    /// Confirma el paso actual. Devuelve `Push` con la pantalla siguiente, o
    /// `Dismiss` si era el último paso y la decisión se registró.
    pub async fn advance(&mut self) -> Result<Navigation> {
        let complete = self.can_advance();
        match self.engine.advance(complete)? {
            Transition::Moved(i) => {
                let step = self.steps[i];
                debug!("avanzando a {}", step);
                Ok(NavigationIntent::Push(self.render(step)))
            }
            Transition::Submit { .. } => self.submit().await,
        }
    }

    /// Rechaza la transacción desde cualquier estado no terminal.
    pub async fn cancel(&mut self) -> Result<Navigation> {
        self.engine.cancel()?;
        self.submit().await
    }

    /// Reintenta el envío tras un `SubmissionFailure`.
    pub async fn retry_submission(&mut self) -> Result<Navigation> {
        self.submit().await
    }

    async fn submit(&mut self) -> Result<Navigation> {
        let receipt = self.service.submit(&mut self.engine, self.transaction.transaction_id()).await?;
        let accepted = receipt.decision.accepted;
        self.receipt = Some(receipt);
        Ok(NavigationIntent::Dismiss { accepted })
    }

    fn render(&self, step: FlowStep) -> ScreenContent {
        self.renderer.render(step, &self.transaction, &self.inputs)
    }

    fn current_inputs_mut(&mut self) -> Result<&mut StepInputs> {
        let step = self.active_step()?;
        self.inputs
            .get_mut(&step)
            .ok_or_else(|| WorkflowError::Validation(format!("sin datos para el paso {}", step)))
    }

    fn active_step(&self) -> Result<FlowStep> {
        self.current_step().ok_or_else(|| {
                               WorkflowError::from(flow::FlowError::InvalidTransition { state: self.engine.state(),
                                                                                        action: "edit" })
                           })
    }

    fn current_items(&self) -> Option<&[LineItem]> {
        let step = self.current_step()?;
        match template(step).completion {
            Completion::TransactionItems => Some(self.transaction.line_items()),
            Completion::OwnItems => self.inputs.get(&step).map(|i| i.items()),
            _ => None,
        }
    }

    fn current_items_mut(&mut self, reference: &str) -> Result<&mut [LineItem]> {
        let step = self.active_step()?;
        match template(step).completion {
            Completion::TransactionItems => Ok(self.transaction.line_items_mut()),
            Completion::OwnItems => self.inputs
                                        .get_mut(&step)
                                        .map(|i| i.items_mut())
                                        .ok_or_else(|| WorkflowError::UnknownItem(reference.to_string())),
            _ => Err(WorkflowError::UnknownItem(reference.to_string())),
        }
    }
}
