// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Platonia CLI entrypoint.
//!
//! Loads the concept map, tries the external diagram once, replays the requested hover and
//! selection and prints the derived state. `--svg` writes the current scene.

use std::error::Error;
use std::path::PathBuf;

use platonia::config::Config;
use platonia::diagram::{
    DiagramController, DiagramSource, FileSource, InlineSource, ListenerRegistry, PointerEvent,
    RenderModeKind,
};
use platonia::model::{fixtures, ConceptMap, EpisodeBank, NodeId, QuestionBank};
use platonia::render::{external_patches, render_generated};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--nodes <file>] [--questions <file>] [--episodes <file>] [--diagram <file>] [--hover <node>] [--select <node>] [--svg <file>]\n\nFixtures default to the embedded concept map, question bank and episode list.\n--diagram tries an external diagram document once and falls back to the generated diagram.\n--svg writes the generated scene (or the external patches) to <file>; `-` writes to stdout.\n\nEnvironment: PLATONIA_SITE_URL, PLATONIA_MIN_PASSWORD_LEN, PLATONIA_NODES, PLATONIA_QUESTIONS, PLATONIA_EPISODES, PLATONIA_DIAGRAM, PLATONIA_LOG."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    nodes: Option<PathBuf>,
    questions: Option<PathBuf>,
    episodes: Option<PathBuf>,
    diagram: Option<PathBuf>,
    hover: Option<String>,
    select: Option<String>,
    svg: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    fn set<T>(slot: &mut Option<T>, value: Option<T>) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        *slot = Some(value.ok_or(())?);
        Ok(())
    }

    let mut options = CliOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--nodes" => set(&mut options.nodes, args.next().map(PathBuf::from))?,
            "--questions" => set(&mut options.questions, args.next().map(PathBuf::from))?,
            "--episodes" => set(&mut options.episodes, args.next().map(PathBuf::from))?,
            "--diagram" => set(&mut options.diagram, args.next().map(PathBuf::from))?,
            "--hover" => set(&mut options.hover, args.next())?,
            "--select" => set(&mut options.select, args.next())?,
            "--svg" => set(&mut options.svg, args.next())?,
            _ => return Err(()),
        }
    }
    Ok(options)
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(platonia::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct Content {
    map: ConceptMap,
    questions: QuestionBank,
    episodes: EpisodeBank,
}

fn load_content(options: &CliOptions, config: &Config) -> Result<Content, Box<dyn Error>> {
    let map = match options.nodes.as_ref().or(config.nodes_path.as_ref()) {
        Some(path) => fixtures::load_map(path)?,
        None => fixtures::default_map()?,
    };
    let questions = match options.questions.as_ref().or(config.questions_path.as_ref()) {
        Some(path) => fixtures::load_questions(path)?,
        None => fixtures::default_questions()?,
    };
    let episodes = match options.episodes.as_ref().or(config.episodes_path.as_ref()) {
        Some(path) => fixtures::load_episodes(path)?,
        None => fixtures::default_episodes()?,
    };
    Ok(Content {
        map,
        questions,
        episodes,
    })
}

fn print_state(controller: &DiagramController, questions: &QuestionBank, episodes: &EpisodeBank) {
    let map = controller.map();
    let stats = map.state_stats();
    let mode = match controller.mode_kind() {
        RenderModeKind::Generated => "generated",
        RenderModeKind::External => "external",
    };
    println!(
        "mode: {mode}\nnodes: {} (active {}, latent {}, saturated {}, other {})",
        stats.total, stats.active, stats.latent, stats.saturated, stats.other
    );

    for node in map.nodes() {
        let visual = controller.node_visual(node);
        println!(
            "  {:<10} {:<10} {}{}",
            node.id(),
            node.state(),
            visual.fill,
            if visual.glow { " *" } else { "" }
        );
    }
    for edge in map.edges() {
        let visual = controller.edge_visual(edge);
        println!(
            "  {} - {}  opacity {} width {}",
            edge.source(),
            edge.target(),
            visual.opacity,
            visual.stroke_width
        );
    }

    if let Some(node) = controller.selected_node() {
        println!("\n{} [{}]\n{}", node.label(), node.axis(), node.description());
        for question in questions.related_to(node.id()) {
            println!("  ? {}", question.question());
        }
        for episode in episodes.related_to(node.id()) {
            println!(
                "  > #{} {} ({}, {})",
                episode.number(),
                episode.title(),
                episode.duration(),
                episode.date()
            );
        }
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "platonia".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = Config::from_env()?;
        init_tracing(&config.log_filter);

        let Content {
            map,
            questions,
            episodes,
        } = load_content(&options, &config)?;
        let hover = options.hover.as_deref().map(NodeId::new).transpose()?;
        let select = options.select.as_deref().map(NodeId::new).transpose()?;
        for id in hover.iter().chain(&select) {
            if !map.contains(id.as_str()) {
                return Err(format!("unknown node: {id}").into());
            }
        }

        let source: Box<dyn DiagramSource> =
            match options.diagram.as_ref().or(config.diagram_path.as_ref()) {
                Some(path) => Box::new(FileSource::new(path)),
                None => Box::new(InlineSource::absent()),
            };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let mut controller = DiagramController::new(map).on_select(|node| match node {
                Some(node) => tracing::info!(node_id = %node.id(), "node selected"),
                None => tracing::info!("selection cleared"),
            });
            let mut registry = ListenerRegistry::new();
            let mode = controller.load_diagram(source.as_ref(), &mut registry).await;

            let pointer = |controller: &mut DiagramController, id: &NodeId, event: PointerEvent| {
                if mode == RenderModeKind::External {
                    registry.dispatch(controller, id, event);
                } else {
                    controller.handle_pointer(id.as_str(), event);
                }
            };
            if let Some(id) = &select {
                pointer(&mut controller, id, PointerEvent::Click);
            }
            if let Some(id) = &hover {
                pointer(&mut controller, id, PointerEvent::Enter);
            }

            print_state(&controller, &questions, &episodes);

            if let Some(target) = options.svg.as_deref() {
                let output = match mode {
                    RenderModeKind::Generated => render_generated(&controller),
                    RenderModeKind::External => external_patches(&controller)
                        .iter()
                        .map(|patch| format!("{patch:?}"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                };
                if target == "-" {
                    println!("{output}");
                } else {
                    tokio::fs::write(target, output).await?;
                }
            }

            controller.teardown(&mut registry);
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("platonia: {err}");
        std::process::exit(1);
    }
}
