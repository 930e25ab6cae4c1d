use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use vn_core::{DialogueLine, StoryManifest};
use vn_engine::{Advance, Background, CancelToken, DirSource, NarrativeController};

use crate::palette;

type Controller = NarrativeController<DirSource>;

/// Options for an interactive session.
pub struct PlayOptions {
    /// Story to play instead of the configured default.
    pub story: Option<String>,
    /// Print dialogue at once instead of typing it out.
    pub instant: bool,
    /// Print scene, chapter, background and state after each scene.
    pub debug: bool,
}

pub async fn run(dir: &Path, options: PlayOptions) -> Result<(), String> {
    let mut engine = super::open_game(dir).await?;

    let story = match &options.story {
        Some(id) => id.clone(),
        None => engine.active_story_id().unwrap_or_default().to_string(),
    };
    engine
        .set_active_story(&story)
        .await
        .map_err(|e| format!("cannot play \"{story}\": {e}"))?;
    let title = engine
        .active_manifest()
        .map_err(|e| e.to_string())?
        .metadata
        .title
        .clone();

    let mut controller = NarrativeController::new(engine);

    println!("  {} {title}", "Playing".bold());
    println!("  Type a choice number, 'restart', 'state', or 'quit'.\n");

    if let Advance::Failed(e) = controller.begin().await {
        return Err(format!("cannot start \"{story}\": {e}"));
    }
    present(&mut controller, &options)
        .await
        .map_err(|e| e.to_string())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            break; // EOF
        };

        match line.trim() {
            "" => continue,
            "quit" | "q" => break,
            "state" => print_state(&controller),
            "restart" => {
                println!("  {}\n", "Restarting...".bold());
                controller.restart_game();
                let advance = controller.begin().await;
                step(&mut controller, advance, &options).await?;
            }
            other => match other.parse::<usize>() {
                Ok(number) if number > 0 => {
                    let advance = controller.choose(number - 1).await;
                    step(&mut controller, advance, &options).await?;
                }
                _ => {
                    log::debug!("unrecognised input {other:?}");
                    println!("{}\n", format!("unknown command: {other}").yellow());
                }
            },
        }
    }

    Ok(())
}

async fn step(
    controller: &mut Controller,
    advance: Advance,
    options: &PlayOptions,
) -> Result<(), String> {
    match advance {
        Advance::Presented => present(controller, options)
            .await
            .map_err(|e| e.to_string()),
        Advance::Ignored => {
            log::debug!("choice ignored in phase {:?}", controller.phase());
            println!("{}\n", "That choice is not available.".yellow());
            Ok(())
        }
        Advance::Failed(e) => {
            log::warn!("staying on the current scene: {e}");
            println!("{}", format!("could not load scene: {e}").yellow());
            print_choices(controller);
            Ok(())
        }
    }
}

async fn present(controller: &mut Controller, options: &PlayOptions) -> io::Result<()> {
    if options.debug {
        print_debug(controller).await;
    }

    let view = controller.view();
    // A return keeps the dialogue already on screen.
    if !view.is_returning {
        let manifest = controller.engine().active_manifest().ok();
        let speed = if options.instant {
            Duration::ZERO
        } else {
            controller.engine().config().typing_speed
        };
        println!();
        for line in view.dialogue {
            say(line, manifest, speed).await?;
        }
    }

    controller.typing_finished();
    print_choices(controller);
    Ok(())
}

async fn say(line: &DialogueLine, manifest: Option<&StoryManifest>, speed: Duration) -> io::Result<()> {
    let mut out = io::stdout();

    if line.speaker.is_empty() {
        write!(out, "  ")?;
    } else {
        let color = manifest
            .and_then(|m| m.speaker_color(&line.speaker))
            .and_then(palette::color_for);
        let name = match color {
            Some(color) => line.speaker.color(color).bold(),
            None => line.speaker.bold(),
        };
        write!(out, "  {name}: ")?;
    }

    if speed.is_zero() {
        writeln!(out, "{}", line.line)?;
        return Ok(());
    }
    for c in line.line.chars() {
        write!(out, "{c}")?;
        out.flush()?;
        tokio::time::sleep(speed).await;
    }
    writeln!(out)
}

fn print_choices(controller: &Controller) {
    let view = controller.view();
    println!();
    if view.choices.is_empty() {
        println!("  {}\n", "No choices here. Type 'restart' or 'quit'.".dimmed());
        return;
    }
    for (i, choice) in view.choices.iter().enumerate() {
        let label = format!("{}. {}", i + 1, choice.choice.text);
        if choice.explored {
            println!("  {} {}", label.dimmed(), "(explored)".dimmed());
        } else {
            println!("  {label}");
        }
    }
    println!();
}

fn print_state(controller: &Controller) {
    let state = controller.engine().game_state();
    if state.is_empty() {
        println!("  (no state)\n");
        return;
    }
    for (key, value) in &state {
        println!("  {key} = {value}");
    }
    println!();
}

async fn print_debug(controller: &Controller) {
    let view = controller.view();

    let background = match view.background_key {
        Some(key) => {
            controller
                .engine()
                .resolve_background(key, &CancelToken::never())
                .await
        }
        None => None,
    };
    let background = match background {
        Some(Background::Image { path }) => format!("image {path}"),
        Some(Background::Gradient(colors)) => format!("gradient {} to {}", colors.from, colors.to),
        Some(Background::None) | None => "none".to_string(),
    };

    let state: Vec<String> = view
        .game_state
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    let tag = "[debug]".dimmed();
    println!(
        "  {tag} story={} chapter={} scene={} returning={}",
        view.story_id.unwrap_or("-"),
        view.chapter_id.unwrap_or("-"),
        view.scene_id.unwrap_or("-"),
        view.is_returning,
    );
    println!(
        "  {tag} background={} ({background})",
        view.background_key.unwrap_or("-")
    );
    println!("  {tag} state={{{}}}", state.join(", "));
}
