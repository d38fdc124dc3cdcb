use crate::engine::{Navigation, TransactionFlow};
use crate::plan::FlowPlan;
use crate::WorkflowError;
use consent_client::{ClientConfig, HubClient, TransactionPoller};
use consent_domain::{DomainStubs, InMemoryWallet, PermissionWallet, StubTransactionSource, Transaction,
                     TransactionSource, WalletEntry};
use flow::{NavigationIntent, RecordingResponder, Responder, SubmissionPolicy};
use log::{info, warn};
use std::sync::Arc;

/// Coordina las sesiones de consentimiento: abre un flujo por cada
/// transacción recibida, delega en él las acciones del usuario y registra
/// en el monedero las transacciones aceptadas.
pub struct FlowCoordinator<R>
  where R: Responder + ?Sized
{
  responder: Arc<R>,
  policy: SubmissionPolicy,
  plan: FlowPlan,
  wallet: Arc<dyn PermissionWallet>,
  active: Option<TransactionFlow<R>>,
}

impl<R> FlowCoordinator<R> where R: Responder + ?Sized
{
  pub fn new(responder: Arc<R>, plan: FlowPlan, policy: SubmissionPolicy, wallet: Arc<dyn PermissionWallet>) -> Self {
    Self { responder, policy, plan, wallet, active: None }
  }

  pub fn plan(&self) -> FlowPlan {
    self.plan
  }

  pub fn wallet(&self) -> &Arc<dyn PermissionWallet> {
    &self.wallet
  }

  /// Último flujo abierto (puede estar terminado).
  pub fn active(&self) -> Option<&TransactionFlow<R>> {
    self.active.as_ref()
  }

  pub fn active_mut(&mut self) -> Option<&mut TransactionFlow<R>> {
    self.active.as_mut()
  }

  /// Verdadero si hay un flujo abierto que aún no terminó.
  pub fn has_active_flow(&self) -> bool {
    self.active.as_ref().map(|f| !f.is_finished()).unwrap_or(false)
  }

  /// Abre un flujo para la transacción recibida. Devuelve `Push` con la
  /// primera pantalla, o `Replace` si había otro flujo sin terminar (que se
  /// descarta sin enviar decisión).
  pub fn receive(&mut self, transaction: Transaction) -> Result<Navigation, WorkflowError> {
    let flow = TransactionFlow::with_steps(transaction, self.plan.steps(), self.responder.clone(), self.policy)?;
    let screen = flow.current_screen().ok_or_else(|| WorkflowError::Validation("el flujo nuevo no tiene pantalla".into()))?;
    let replacing = self.has_active_flow();
    if let (true, Some(old)) = (replacing, self.active.as_ref()) {
      warn!("flujo de {} sustituido por {}",
            old.transaction().transaction_id(),
            flow.transaction().transaction_id());
    }
    self.active = Some(flow);
    Ok(if replacing { NavigationIntent::Replace(screen) } else { NavigationIntent::Push(screen) })
  }

  pub async fn advance(&mut self) -> Result<Navigation, WorkflowError> {
    let nav = self.active.as_mut().ok_or(WorkflowError::NoActiveFlow)?.advance().await?;
    Ok(self.record_if_accepted(nav))
  }

  pub async fn cancel(&mut self) -> Result<Navigation, WorkflowError> {
    let nav = self.active.as_mut().ok_or(WorkflowError::NoActiveFlow)?.cancel().await?;
    Ok(self.record_if_accepted(nav))
  }

  pub async fn retry_submission(&mut self) -> Result<Navigation, WorkflowError> {
    let nav = self.active.as_mut().ok_or(WorkflowError::NoActiveFlow)?.retry_submission().await?;
    Ok(self.record_if_accepted(nav))
  }

  fn record_if_accepted(&self, nav: Navigation) -> Navigation {
    if let (NavigationIntent::Dismiss { accepted: true }, Some(flow)) = (&nav, self.active.as_ref()) {
      // La decisión ya está en el servidor; un fallo del monedero no la anula.
      if let Err(e) = self.wallet.record(WalletEntry::from_transaction(flow.transaction())) {
        warn!("no se pudo registrar {} en el monedero: {}", flow.transaction().transaction_id(), e);
      }
    }
    nav
  }
}

/// Piezas listas para ejecutar el flujo: coordinador, origen de
/// transacciones y la configuración usada.
pub struct ConsentRuntime {
  pub coordinator: FlowCoordinator<dyn Responder>,
  pub source: Arc<dyn TransactionSource>,
  pub config: ClientConfig,
}

impl ConsentRuntime {
  /// Poller sobre el origen con el intervalo configurado.
  pub fn poller(&self) -> TransactionPoller<dyn TransactionSource> {
    TransactionPoller::new(self.source.clone(), self.config.poll_interval())
  }
}

/// Fábrica de flujos y de runtimes.
pub struct FlowFactory;

impl FlowFactory {
  /// Construye el runtime leyendo la configuración del entorno.
  pub fn from_env() -> Result<ConsentRuntime, WorkflowError> {
    let config = ClientConfig::from_env()?;
    Self::from_config(config)
  }

  /// Construye el runtime. Con `mock` activo se usan el origen de ejemplo y
  /// un responder en memoria; si no, el cliente HTTP para ambos.
  pub fn from_config(config: ClientConfig) -> Result<ConsentRuntime, WorkflowError> {
    let plan: FlowPlan = config.plan.parse()?;
    let policy = config.submission_policy();
    let wallet: Arc<dyn PermissionWallet> = Arc::new(InMemoryWallet::new());

    let source: Arc<dyn TransactionSource>;
    let responder: Arc<dyn Responder>;
    if config.mock {
      source = Arc::new(StubTransactionSource::new());
      responder = Arc::new(RecordingResponder::new());
    } else {
      let client = Arc::new(HubClient::new(config.clone())?);
      source = client.clone();
      responder = client;
    }
    info!("runtime listo: plan={}, mock={}, url={}", plan, config.mock, config.base_url);
    Ok(ConsentRuntime { coordinator: FlowCoordinator::new(responder, plan, policy, wallet), source, config })
  }

  /// Flujo sobre la transacción de ejemplo con un responder en memoria.
  pub fn sample_flow(plan: FlowPlan)
                     -> Result<(TransactionFlow<RecordingResponder>, Arc<RecordingResponder>), WorkflowError> {
    let responder = Arc::new(RecordingResponder::new());
    let transaction = DomainStubs::sample_transaction()?;
    let flow = TransactionFlow::new(transaction, plan, responder.clone())?;
    Ok((flow, responder))
  }
}
