use consent_domain::{date_and_time_label, date_label, PermissionWallet};
use consent_workflow::{ContentBlock, FlowFactory, Navigation, NoticeKind, ScreenContent};
use flow::NavigationIntent;
use log::{info, warn};
use std::error::Error;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Intentos de consulta al esperar una transacción desde el menú.
const POLL_ATTEMPTS: u32 = 30;

/// Pequeño menú interactivo para responder solicitudes de consentimiento.
///
/// Sin flujo activo:
/// 1) Esperar una transacción
/// 2) Ver el monedero de permisos
/// 3) Salir
///
/// Con flujo activo se muestra la pantalla del paso actual y se aceptan
/// comandos (`h` para la lista).
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                             .init();

    let mut runtime = FlowFactory::from_env()?;
    info!("configuración: {:?}", runtime.config);
    println!("Permission Hub ({}, plan {})",
             if runtime.config.mock { "mock".to_string() } else { runtime.config.base_url.clone() },
             runtime.coordinator.plan());

    loop {
        if !runtime.coordinator.has_active_flow() {
            println!("\n== Permission Hub ==");
            println!("1) Esperar una transacción");
            println!("2) Ver monedero de permisos");
            println!("3) Salir");
            match prompt("Elige una opción: ")?.trim() {
                "1" => {
                    println!("Consultando transacciones pendientes...");
                    match runtime.poller().poll(Some(POLL_ATTEMPTS)).await {
                        Ok(Some(tx)) => match runtime.coordinator.receive(tx) {
                            Ok(nav) => show(&nav),
                            Err(e) => eprintln!("No se pudo abrir el flujo: {}", e),
                        },
                        Ok(None) => println!("No hay transacciones pendientes"),
                        Err(e) => eprintln!("Transacción inválida: {}", e),
                    }
                }
                "2" => match runtime.coordinator.wallet().list() {
                    Ok(entries) if entries.is_empty() => println!("El monedero está vacío"),
                    Ok(entries) => {
                        let today = chrono::Local::now().date_naive();
                        for e in entries {
                            println!("{} | {} | {} | {}", date_label(e.date, today), e.title, e.subtitle, e.consent_hash);
                        }
                    }
                    Err(e) => eprintln!("Error leyendo el monedero: {}", e),
                },
                "3" => {
                    println!("Saliendo...");
                    break;
                }
                other => println!("Opción inválida: {}", other),
            }
            continue;
        }

        let line = prompt("\nComando (h para ayuda): ")?;
        let mut parts = line.trim().splitn(3, ' ');
        let command = parts.next().unwrap_or("");
        let index = parts.next().and_then(|n| n.parse::<usize>().ok()).filter(|n| *n > 0).map(|n| n - 1);
        let rest = parts.next().unwrap_or("").trim().to_string();

        let outcome: Result<Option<Navigation>, consent_workflow::WorkflowError> = match (command, index) {
            ("h", _) => {
                print_help();
                Ok(None)
            }
            ("p", _) => {
                if let Some(screen) = runtime.coordinator.active().and_then(|f| f.current_screen()) {
                    print_screen(&screen);
                }
                Ok(None)
            }
            ("a", Some(i)) | ("d", Some(i)) => toggle(&mut runtime.coordinator, i, command == "a"),
            ("f", Some(i)) => match runtime.coordinator.active_mut() {
                Some(flow) => flow.fill_field(i, &rest).map(|_| None),
                None => Ok(None),
            },
            ("s", Some(i)) => match runtime.coordinator.active_mut() {
                Some(flow) => flow.select_option(i).map(|_| None),
                None => Ok(None),
            },
            ("w", _) | ("v", _) => {
                let kind = if command == "w" { NoticeKind::Warning } else { NoticeKind::Verification };
                match runtime.coordinator.active() {
                    Some(flow) => flow.open_notice(kind).map(Some),
                    None => Ok(None),
                }
            }
            ("c", _) => runtime.coordinator.advance().await.map(Some),
            ("x", _) => runtime.coordinator.cancel().await.map(Some),
            ("r", _) => runtime.coordinator.retry_submission().await.map(Some),
            ("q", _) => {
                println!("Saliendo...");
                break;
            }
            _ => {
                println!("Comando inválido: {}", line.trim());
                Ok(None)
            }
        };

        match outcome {
            Ok(Some(nav)) => show(&nav),
            Ok(None) => {}
            Err(e) if e.is_submission_failure() => {
                warn!("envío fallido: {}", e);
                eprintln!("No se pudo enviar la decisión: {}", e);
                println!("Usa 'r' para reintentar o 'x' para rechazar");
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

fn toggle(coordinator: &mut consent_workflow::FlowCoordinator<dyn flow::Responder>,
          index: usize,
          accepted: bool)
          -> Result<Option<Navigation>, consent_workflow::WorkflowError> {
    let Some(flow) = coordinator.active_mut() else {
        return Ok(None);
    };
    let id = flow.current_screen()
                 .and_then(|s| s.line_items().get(index).map(|(id, _)| *id))
                 .ok_or_else(|| consent_workflow::WorkflowError::UnknownItem(format!("#{}", index + 1)))?;
    let gate = flow.set_accepted(id, accepted)?;
    println!("Todos los items aceptados: {}", if gate { "sí" } else { "no" });
    Ok(None)
}

fn show(nav: &Navigation) {
    match nav {
        NavigationIntent::Push(screen) | NavigationIntent::PushDetail(screen) => print_screen(screen),
        NavigationIntent::Replace(screen) => {
            println!("(nueva transacción: el flujo anterior se descartó)");
            print_screen(screen);
        }
        NavigationIntent::Dismiss { accepted } => {
            println!("Decisión registrada: {}", if *accepted { "aceptada" } else { "rechazada" })
        }
    }
}

fn print_screen(screen: &ScreenContent) {
    let today = chrono::Local::now().date_naive();
    println!("\n=== {} ===", screen.title.as_deref().unwrap_or(""));
    let mut item_n = 0;
    let mut form_n = 0;
    for block in &screen.blocks {
        match block {
            ContentBlock::Notification { kind, text } => {
                let tag = match kind {
                    NoticeKind::Verification => "✔",
                    NoticeKind::Warning => "!",
                };
                println!("[{}] {}", tag, text);
            }
            ContentBlock::Description { date, title, description } => {
                if let Some(d) = date {
                    println!("{}", date_and_time_label(*d, today));
                }
                println!("{}\n  {}", title, description);
            }
            ContentBlock::Plugin { image, text } => {
                println!("<{}> {}", image.as_deref().unwrap_or("plugin"), text)
            }
            ContentBlock::LineItem { name, fields, accepted, .. } => {
                item_n += 1;
                println!("  {}. [{}] {} ({})", item_n, if *accepted { "x" } else { " " }, name, fields.join(", "));
            }
            ContentBlock::SelectionDisclosure { text } => println!("  {} >", text),
            ContentBlock::Selection { options, selected } => {
                for (i, option) in options.iter().enumerate() {
                    println!("  ({}) {}. {}", if *selected == Some(i) { "*" } else { " " }, i + 1, option);
                }
            }
            ContentBlock::Form { placeholder, text, .. } => {
                form_n += 1;
                println!("  {}. {}: {}", form_n, placeholder, text);
            }
            ContentBlock::Document { file_name } => println!("  [documento: {}]", file_name),
        }
    }
}

fn print_help() {
    println!("a N       aceptar el item N");
    println!("d N       quitar la aceptación del item N");
    println!("f N texto rellenar el campo N");
    println!("s N       elegir la opción N");
    println!("c         continuar");
    println!("x         rechazar la transacción");
    println!("w / v     ver advertencias / verificaciones");
    println!("r         reintentar el envío");
    println!("p         mostrar la pantalla actual");
    println!("q         salir");
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
