use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use veritium::api::HttpPredictionClient;
use veritium::app::{AppError, FormController};
use veritium::config::Settings;
use veritium::input::{self, Command, CommandError};
use veritium::ui::{FormView, PanelRenderer};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    info!("Prediction endpoint: {}", settings.api_url);

    let client = HttpPredictionClient::new(settings.api_url.clone())?;
    let renderer = match PanelRenderer::from_settings(&settings) {
        Ok(renderer) => renderer,
        Err(e) => {
            warn!("{}; panel text will not be drawn", e);
            PanelRenderer::new(settings.canvas_width, settings.canvas_height)
        }
    };
    let controller = FormController::new(Arc::new(client.clone()));
    let color = std::io::stdout().is_terminal();

    println!("{}\n", input::HELP);
    print_form(&controller, color);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if stdin.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        let line = input::decode_line(&raw);
        let command = match input::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Title(title) => controller.update_title(title),
            Command::Body(body) => controller.update_body(body),
            Command::AppendBody(line) => controller.append_body_line(&line),
            Command::Analyze => analyze(&controller, color),
            Command::Clear => {
                controller.clear();
                print_form(&controller, color);
            }
            Command::Show => print_form(&controller, color),
            Command::Render(path) => {
                let path = path.unwrap_or_else(|| settings.output_path.clone());
                render(&renderer, &controller, &path);
            }
            Command::Health => health(&client),
            Command::Help => println!("{}", input::HELP),
            Command::Quit => break,
        }
    }

    info!("Bye");
    Ok(())
}

/// Presses the Analyze button
///
/// The button is disabled while a request is in flight, so a second press
/// is refused here rather than in the controller. The form goes pending
/// before the request task is spawned.
fn analyze(controller: &FormController, color: bool) {
    if controller.status().is_pending() {
        println!("Still analyzing, please wait");
        return;
    }
    let Some(request) = controller.accept_submit() else {
        println!("Enter a title or some text first");
        return;
    };

    let controller = controller.clone();
    tokio::spawn(async move {
        controller.send(request).await;
        print_form(&controller, color);
    });
}

/// Probes the service on its own task so a hung service never blocks input
fn health(client: &HttpPredictionClient) {
    let client = client.clone();
    tokio::spawn(async move {
        match client.health().await {
            Ok(message) => println!("Service at {}: {}", client.predict_url(), message),
            Err(e) => println!("Service unavailable: {}", e),
        }
    });
}

fn render(renderer: &PanelRenderer, controller: &FormController, path: &Path) {
    let view = FormView::from_state(&controller.snapshot());
    let saved = renderer
        .render(&view)
        .and_then(|pixmap| PanelRenderer::save_png(&pixmap, path));

    match saved {
        Ok(()) if !renderer.has_font() => {
            println!("Panel saved to {} without text (set VERITIUM_FONT)", path.display())
        }
        Ok(()) => println!("Panel saved to {}", path.display()),
        Err(e) => println!("Could not render panel: {}", e),
    }
}

fn print_form(controller: &FormController, color: bool) {
    let view = FormView::from_state(&controller.snapshot());
    println!("{}", view.render_text(color));
}
