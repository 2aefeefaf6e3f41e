// ABOUTME: Line-oriented command surface for the layout store.
// ABOUTME: Parses split/close/focus/resize commands and prints layout JSON.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use spad_core::{Direction, FileId, LayoutSettings, PaneId};
use spad_layout::{DragSession, LayoutStore, Rect, Viewport};

/// Which pane a split command targets
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Active,
    Pane(PaneId),
}

/// Keyboard-style resize amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nudge {
    Grow,
    Shrink,
    By(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Split {
        target: Target,
        direction: Direction,
        file: Option<FileId>,
    },
    Close(PaneId),
    Ratio(PaneId, f32),
    Nudge(PaneId, Nudge),
    /// Divider drag: split id, viewport size in pixels, pointer offset
    Drag(PaneId, Viewport, f32),
    File(PaneId, Option<FileId>),
    Focus(PaneId),
    Next,
    Prev,
    Reset,
    Show,
    Rects,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        if verb.starts_with('#') {
            return Ok(None);
        }
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("split", [target, direction, rest @ ..]) if rest.len() <= 1 => Command::Split {
                target: match *target {
                    "active" => Target::Active,
                    id => Target::Pane(PaneId::from(id)),
                },
                direction: direction.parse()?,
                file: rest.first().map(|f| FileId::from(*f)),
            },
            ("close", [pane]) => Command::Close(PaneId::from(*pane)),
            ("ratio", [split, value]) => Command::Ratio(
                PaneId::from(*split),
                value
                    .parse()
                    .with_context(|| format!("Invalid ratio: {}", value))?,
            ),
            ("nudge", [split, amount]) => {
                let nudge = match *amount {
                    "+" => Nudge::Grow,
                    "-" => Nudge::Shrink,
                    other => Nudge::By(
                        other
                            .parse()
                            .with_context(|| format!("Invalid resize delta: {}", other))?,
                    ),
                };
                Command::Nudge(PaneId::from(*split), nudge)
            }
            ("drag", [split, width, height, delta]) => {
                let number = |s: &str| -> Result<f32> {
                    let value: f32 = s
                        .parse()
                        .with_context(|| format!("Invalid number in drag: {}", s))?;
                    if !value.is_finite() {
                        bail!("Invalid number in drag: {}", s);
                    }
                    Ok(value)
                };
                let viewport = Viewport {
                    width: number(*width)?,
                    height: number(*height)?,
                };
                Command::Drag(PaneId::from(*split), viewport, number(*delta)?)
            }
            ("file", [pane, "-"]) => Command::File(PaneId::from(*pane), None),
            ("file", [pane, file]) => Command::File(PaneId::from(*pane), Some(FileId::from(*file))),
            ("focus", [pane]) => Command::Focus(PaneId::from(*pane)),
            ("next", []) => Command::Next,
            ("prev", []) => Command::Prev,
            ("reset", []) => Command::Reset,
            ("show", []) => Command::Show,
            ("rects", []) => Command::Rects,
            ("quit" | "exit", []) => Command::Quit,
            ("split" | "close" | "ratio" | "nudge" | "drag" | "file" | "focus", _) => {
                bail!("Wrong arguments for '{}': {}", verb, line.trim())
            }
            _ => bail!("Unknown command: {}", verb),
        };
        Ok(Some(command))
    }
}

#[derive(Serialize)]
struct PaneRect<'a> {
    id: &'a PaneId,
    #[serde(flatten)]
    rect: Rect,
}

/// Run a command against the store and write the resulting JSON line
pub fn execute(
    store: &mut LayoutStore,
    command: Command,
    settings: &LayoutSettings,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Split {
            target,
            direction,
            file,
        } => {
            let created = match target {
                Target::Active => store.split_active(direction, file),
                Target::Pane(id) => store.split_pane(&id, direction, file),
            };
            match created {
                Some(id) => tracing::info!(
                    "Added pane {}, total panes: {}",
                    id,
                    store.pane_count()
                ),
                None => tracing::warn!("Split had no effect"),
            }
        }
        Command::Close(id) => {
            store.close_pane(&id);
            tracing::info!("Closed pane {}, remaining panes: {}", id, store.pane_count());
        }
        Command::Ratio(id, ratio) => store.set_ratio(&id, ratio),
        Command::Nudge(id, nudge) => {
            let delta = match nudge {
                Nudge::Grow => settings.resize_step,
                Nudge::Shrink => -settings.resize_step,
                Nudge::By(delta) => delta,
            };
            store.adjust_ratio(&id, delta);
        }
        Command::Drag(id, viewport, delta) => match DragSession::begin(store, &id, viewport) {
            Some(drag) => match drag.update(store, delta) {
                Some(ratio) => tracing::debug!("Dragged {} to ratio {}", id, ratio),
                None => tracing::warn!("Drag of {} had no effect", id),
            },
            None => tracing::warn!("Cannot drag {}: not a split", id),
        },
        Command::File(id, file) => store.set_pane_file(&id, file),
        Command::Focus(id) => store.set_active_pane(&id),
        Command::Next => store.focus_next(),
        Command::Prev => store.focus_prev(),
        Command::Reset => store.reset(),
        Command::Show | Command::Quit => {}
        Command::Rects => {
            let rects = store.pane_rects();
            let leaves = store.leaves();
            let ordered: Vec<PaneRect> = leaves
                .iter()
                .filter_map(|leaf| {
                    rects.get(&leaf.id).map(|rect| PaneRect {
                        id: &leaf.id,
                        rect: *rect,
                    })
                })
                .collect();
            serde_json::to_writer(&mut *out, &ordered)?;
            writeln!(out)?;
            return Ok(());
        }
    }

    serde_json::to_writer(&mut *out, &store.snapshot())?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(store: &mut LayoutStore, line: &str) -> serde_json::Value {
        let command = Command::parse(line).unwrap().unwrap();
        let mut out = Vec::new();
        execute(store, command, &LayoutSettings::default(), &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn parses_split_forms() {
        assert_eq!(
            Command::parse("split active v").unwrap(),
            Some(Command::Split {
                target: Target::Active,
                direction: Direction::Vertical,
                file: None,
            })
        );
        assert_eq!(
            Command::parse("split pane-initial horizontal main.rs").unwrap(),
            Some(Command::Split {
                target: Target::Pane(PaneId::from("pane-initial")),
                direction: Direction::Horizontal,
                file: Some(FileId::from("main.rs")),
            })
        );
        assert!(Command::parse("split active sideways").is_err());
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# a comment").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_and_malformed_commands() {
        assert!(Command::parse("explode").is_err());
        assert!(Command::parse("close").is_err());
        assert!(Command::parse("ratio split-2 wide").is_err());
    }

    #[test]
    fn parses_file_and_nudge() {
        assert_eq!(
            Command::parse("file pane-initial -").unwrap(),
            Some(Command::File(PaneId::from("pane-initial"), None))
        );
        assert_eq!(
            Command::parse("nudge s +").unwrap(),
            Some(Command::Nudge(PaneId::from("s"), Nudge::Grow))
        );
        assert_eq!(
            Command::parse("nudge s -0.1").unwrap(),
            Some(Command::Nudge(PaneId::from("s"), Nudge::By(-0.1)))
        );
    }

    #[test]
    fn execute_prints_snapshot() {
        let mut store = LayoutStore::new();
        let json = run(&mut store, "split active vertical");
        assert_eq!(json["root"]["kind"], "split");
        assert_eq!(json["root"]["direction"], "vertical");
        assert_eq!(json["activePaneId"], json["root"]["second"]["id"]);

        let json = run(&mut store, "close pane-initial");
        assert_eq!(json["root"]["kind"], "leaf");
    }

    #[test]
    fn nudge_uses_configured_step() {
        let mut store = LayoutStore::new();
        store.split_active(Direction::Horizontal, None);
        let split_id = store.root().id().clone();

        let json = run(&mut store, &format!("nudge {} +", split_id));
        let ratio = json["root"]["ratio"].as_f64().unwrap();
        assert!((ratio - 0.55).abs() < 1e-5);
    }

    #[test]
    fn drag_converts_pixels_to_ratio() {
        let mut store = LayoutStore::new();
        store.split_active(Direction::Vertical, None);
        let split_id = store.root().id().clone();

        let json = run(&mut store, &format!("drag {} 800 400 -40", split_id));
        let ratio = json["root"]["ratio"].as_f64().unwrap();
        assert!((ratio - 0.4).abs() < 1e-5);
        assert!(Command::parse("drag s 800 tall 3").is_err());
        assert!(Command::parse("drag s 800 400 NaN").is_err());
        assert!(Command::parse("drag s 800 400 inf").is_err());
    }

    #[test]
    fn rects_are_listed_left_to_right() {
        let mut store = LayoutStore::new();
        store.split_active(Direction::Horizontal, None);
        let json = run(&mut store, "rects");
        let rects = json.as_array().unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0]["id"], "pane-initial");
        assert_eq!(rects[1]["x"], 0.5);
    }
}
