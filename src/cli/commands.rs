// Subcommand handlers

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use super::{Cli, Command, Framework, GlobalArgs};
use crate::agent::Action;
use crate::client::{
    AgentClient, AgentError, FeedbackAnalysis, LocalAgent, PoAgent, PrioritizedFeature, UserStory,
};
use crate::config::Config;
use crate::providers::GatewayProvider;
use crate::relay::{Relay, RelayServer};
use crate::views::render::{render_analysis, render_moscow, render_rice_table, render_stories};
use crate::views::samples::{append_sample, resolve_persona};
use crate::views::ticker::{
    DEFAULT_TICK, FEEDBACK_MESSAGES, PRIORITIZATION_MESSAGES, STORIES_MESSAGES,
};
use crate::views::{FeatureBoard, StatusTicker, SubmitError, ViewState};

pub async fn run(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(url) = &cli.global.relay_url {
        config.client.relay_url = url.clone();
    }

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            config.validate()?;
            serve(config).await
        }
        Command::Analyze {
            text,
            file,
            sample,
            output,
        } => {
            let from_file = match file {
                Some(path) => Some(read_feedback_file(&path)?),
                None => None,
            };
            let draft = compose_feedback(text.or(from_file), &sample);
            let agent = build_agent(&cli.global, &config)?;
            analyze(agent.as_ref(), &draft, output.json).await
        }
        Command::Stories {
            description,
            persona,
            output,
        } => {
            let agent = build_agent(&cli.global, &config)?;
            stories(agent.as_ref(), &description, &resolve_persona(&persona), output.json).await
        }
        Command::Prioritize {
            features,
            framework,
            no_ai,
            output,
        } => {
            let mut board = board_for(&features);
            if !no_ai {
                let agent = build_agent(&cli.global, &config)?;
                prioritize(agent.as_ref(), &mut board, output.json).await?;
                if output.json {
                    return Ok(());
                }
            } else if output.json {
                print_board_json(&board)?;
                return Ok(());
            }
            match framework {
                Framework::Rice => print!("{}", render_rice_table(&board)),
                Framework::Moscow => print!("{}", render_moscow(&board)),
            }
            Ok(())
        }
        Command::Actions => {
            for action in Action::ALL {
                println!("{:<22} tool: {}", action.as_str(), action.tool_name());
            }
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let provider = GatewayProvider::from_config(&config.gateway)?;
    tracing::info!(
        model = %config.gateway.model,
        gateway = %config.gateway.base_url,
        "Relay configured"
    );
    RelayServer::new(config.server, Arc::new(provider)).serve().await
}

/// In-process relay with `--local`, otherwise an HTTP client for the configured relay
fn build_agent(global: &GlobalArgs, config: &Config) -> Result<Box<dyn PoAgent>> {
    if global.local {
        let provider = GatewayProvider::from_config(&config.gateway)?;
        tracing::debug!("Running relay in-process");
        Ok(Box::new(LocalAgent::new(Relay::new(Arc::new(provider)))))
    } else {
        Ok(Box::new(AgentClient::new(config.client.relay_url.clone())?))
    }
}

fn read_feedback_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feedback file: {}", path.display()))
}

/// Starting text plus the selected samples (1-based), blank-line separated
pub fn compose_feedback(text: Option<String>, samples: &[u8]) -> String {
    let mut draft = text.unwrap_or_default().trim().to_string();
    for &number in samples {
        if number >= 1 {
            append_sample(&mut draft, usize::from(number) - 1);
        }
    }
    draft
}

/// Named features on a fresh board, or the default board when no names are given
pub fn board_for(names: &[String]) -> FeatureBoard {
    if names.is_empty() {
        return FeatureBoard::with_defaults();
    }
    let mut board = FeatureBoard::new();
    for name in names {
        board.add(name);
    }
    board
}

fn print_status(message: &'static str) {
    eprintln!("… {message}");
}

/// Submit through `view` with progress messages shown while the request runs.
/// Input the view would refuse is rejected before anything is shown.
async fn submit_with_status<'v, T, F, S>(
    view: &'v mut ViewState<T>,
    input: &str,
    messages: &'static [&'static str],
    show: S,
    request: F,
) -> Result<&'v T, SubmitError>
where
    F: Future<Output = Result<T, AgentError>>,
    S: FnMut(&'static str) + Send + 'static,
{
    if view.is_in_flight() {
        return Err(SubmitError::Busy);
    }
    if !view.can_submit(input) {
        return Err(SubmitError::EmptyInput);
    }

    let ticker = StatusTicker::start(messages, DEFAULT_TICK, show);
    let outcome = view.submit(input, request).await;
    ticker.stop().await;
    outcome
}

fn submit_failure(error: SubmitError) -> anyhow::Error {
    match error {
        SubmitError::EmptyInput => anyhow::anyhow!("Nothing to send: the input is empty"),
        other => anyhow::anyhow!(other.to_string()),
    }
}

async fn analyze(agent: &dyn PoAgent, draft: &str, json: bool) -> Result<()> {
    let mut view: ViewState<FeedbackAnalysis> = ViewState::new();
    let analysis = submit_with_status(
        &mut view,
        draft,
        FEEDBACK_MESSAGES,
        print_status,
        agent.analyze_feedback(draft),
    )
    .await
    .map_err(submit_failure)?;
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    } else {
        print!("{}", render_analysis(analysis));
    }
    Ok(())
}

async fn stories(agent: &dyn PoAgent, description: &str, persona: &str, json: bool) -> Result<()> {
    let mut view: ViewState<Vec<UserStory>> = ViewState::new();
    let stories = submit_with_status(
        &mut view,
        description,
        STORIES_MESSAGES,
        print_status,
        agent.generate_stories(description, persona),
    )
    .await
    .map_err(submit_failure)?;
    if json {
        println!("{}", serde_json::to_string_pretty(stories)?);
    } else {
        print!("{}", render_stories(stories));
    }
    Ok(())
}

async fn prioritize(agent: &dyn PoAgent, board: &mut FeatureBoard, json: bool) -> Result<()> {
    let names = board.names();
    if names.is_empty() {
        bail!("Add at least one feature to prioritize");
    }

    let mut view: ViewState<Vec<PrioritizedFeature>> = ViewState::new();
    let scored = submit_with_status(
        &mut view,
        &names.join("\n"),
        PRIORITIZATION_MESSAGES,
        print_status,
        agent.prioritize_features(&names),
    )
    .await
    .map_err(submit_failure)?;
    let report = board.merge_scores(scored);
    for name in &report.unmatched {
        eprintln!("warning: \"{name}\" does not match any feature on the board");
    }
    tracing::info!(updated = report.updated, "Scores merged");

    if json {
        println!("{}", serde_json::to_string_pretty(scored)?);
    }
    Ok(())
}

fn print_board_json(board: &FeatureBoard) -> Result<()> {
    let rows: Vec<_> = board
        .ranked_by_rice()
        .into_iter()
        .map(|(feature, score)| {
            serde_json::json!({
                "name": feature.name,
                "reach": feature.reach,
                "impact": feature.impact,
                "confidence": feature.confidence,
                "effort": feature.effort,
                "riceScore": score,
                "moscow": feature.moscow,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::samples::SAMPLE_FEEDBACKS;
    use std::sync::Mutex;
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl FnMut(&'static str) + Send + 'static) {
        let shown = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&shown);
        (shown, move |message| sink.lock().unwrap().push(message))
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_shows_no_status() {
        let (shown, show) = recorder();
        let mut view: ViewState<u32> = ViewState::new();

        let outcome =
            submit_with_status(&mut view, "  \n ", FEEDBACK_MESSAGES, show, async { Ok(1) }).await;
        assert_eq!(outcome.unwrap_err(), SubmitError::EmptyInput);

        tokio::time::sleep(DEFAULT_TICK * 3).await;
        assert!(shown.lock().unwrap().is_empty());
        assert!(view.result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_shown_while_request_runs() {
        let (shown, show) = recorder();
        let mut view: ViewState<u32> = ViewState::new();

        let request = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(7)
        };
        let outcome = submit_with_status(&mut view, "retour", FEEDBACK_MESSAGES, show, request).await;
        assert_eq!(outcome.unwrap(), &7);

        assert_eq!(shown.lock().unwrap().as_slice(), &FEEDBACK_MESSAGES[..1]);
    }

    #[test]
    fn test_compose_feedback_appends_samples() {
        let draft = compose_feedback(Some("  Mon retour  ".to_string()), &[2]);
        assert_eq!(draft, format!("Mon retour\n\n{}", SAMPLE_FEEDBACKS[1]));

        assert_eq!(compose_feedback(None, &[1]), SAMPLE_FEEDBACKS[0]);
        assert!(compose_feedback(None, &[]).is_empty());
    }

    #[test]
    fn test_board_for() {
        assert_eq!(board_for(&[]).len(), 5);

        let board = board_for(&["Export CSV".to_string(), "  ".to_string()]);
        assert_eq!(board.names(), ["Export CSV"]);
    }

    #[test]
    fn test_empty_input_message() {
        let err = submit_failure(SubmitError::EmptyInput);
        assert!(err.to_string().contains("empty"));
    }
}
