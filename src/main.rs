// SPDX-License-Identifier: MIT
//
// cosineful — a line-oriented inspector host for cosine palettes.
//
// This binary plays the part of an editing host: it knows nothing about the
// palette beyond what the property registry tells it. Each stdin line is one
// command:
//
//   stdin → parse_command → execute → registry get/set or typed palette call
//   palette regeneration → observer → log line
//
// Usage:
//
//   cosineful [--config <file.toml>] [--lazy] [--seed <n>] [--count <n>] [--plain]
//
// Flags override the config file. `RUST_LOG=debug` shows regeneration and
// seed-history activity.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use cf_inspect::command::{COMMANDS, Command, format_value, parse_command, parse_value};
use cf_inspect::{PropertyDescriptor, PropertyHint};
use cf_palette::{MAX_COLOR_COUNT, NO_SEED, PaletteConfig, PaletteResource};
use cf_variant::{Color, Value};
use log::info;
use unicode_width::UnicodeWidthStr;

// ─── Options ────────────────────────────────────────────────────────────────

/// Command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config: Option<PathBuf>,
    lazy: bool,
    seed: Option<i64>,
    count: Option<i64>,
    /// No ANSI color swatches.
    plain: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a path")?;
                opts.config = Some(PathBuf::from(path));
            }
            "--seed" | "-s" => {
                let seed = iter.next().context("--seed needs a value")?;
                opts.seed = Some(seed.parse().with_context(|| format!("bad seed `{seed}`"))?);
            }
            "--count" | "-n" => {
                let count = iter.next().context("--count needs a value")?;
                opts.count = Some(count.parse().with_context(|| format!("bad count `{count}`"))?);
            }
            "--lazy" => opts.lazy = true,
            "--plain" => opts.plain = true,
            other => bail!("unknown argument `{other}`"),
        }
    }
    Ok(opts)
}

/// File settings first, then flags on top.
fn build_config(opts: &Options) -> Result<PaletteConfig> {
    let mut config = match &opts.config {
        Some(path) => PaletteConfig::load(path).with_context(|| format!("{}", path.display()))?,
        None => PaletteConfig::default(),
    };
    if opts.lazy {
        config.interactive = false;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }
    if let Some(count) = opts.count {
        config.color_count = count;
    }
    config.validate()?;
    Ok(config)
}

// ─── Host ───────────────────────────────────────────────────────────────────

/// Whether the command loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The palette under inspection plus output settings.
struct Host {
    resource: PaletteResource,
    plain: bool,
}

impl Host {
    fn new(resource: PaletteResource, plain: bool) -> Self {
        let weak = resource.downgrade();
        resource.subscribe(move || {
            if let Some(palette) = weak.upgrade() {
                info!("palette regenerated: {} colors, seed {}", palette.color_count(), palette.seed());
            }
        });
        Self { resource, plain }
    }

    /// Run one command, writing its output to `out`.
    fn execute(&self, cmd: Command, out: &mut impl Write) -> io::Result<Flow> {
        let res = &self.resource;
        match cmd {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                let width = COMMANDS.iter().map(|(syn, _)| syn.width()).max().unwrap_or(0);
                for (synopsis, about) in COMMANDS {
                    writeln!(out, "  {}  {about}", pad(synopsis, width))?;
                }
            }
            Command::List => {
                let descriptors = res.list_descriptors();
                let width = descriptors.iter().map(|d| d.name.width()).max().unwrap_or(0);
                for d in &descriptors {
                    writeln!(out, "{}", describe(d, width))?;
                }
            }
            Command::Get(name) => {
                if res.registry().contains(&name) {
                    writeln!(out, "{name} = {}", format_value(&res.get(&name)))?;
                } else {
                    writeln!(out, "unknown property `{name}`")?;
                }
            }
            Command::Set { name, value } => self.assign(&name, &value, out)?,
            Command::Press(name) => match res.get(&name) {
                Value::Callable(action) => {
                    action.call();
                    writeln!(out, "pressed {name} (seed {})", res.seed())?;
                }
                _ => writeln!(out, "`{name}` is not a button")?,
            },
            Command::Colors => {
                for (i, color) in res.colors_array().into_iter().enumerate() {
                    writeln!(out, "{i:>4}  {}", self.swatch(color))?;
                }
            }
            Command::Sample(offset) => {
                writeln!(out, "@{offset:.3}  {}", self.swatch(res.color_at_offset(offset)))?;
            }
            Command::Index(index) => match res.color_at_index(index) {
                Some(color) => writeln!(out, "[{index}]  {}", self.swatch(color))?,
                None => writeln!(out, "palette is empty")?,
            },
            Command::Randomize(seed) => {
                let adopted = res.randomize(seed.unwrap_or(NO_SEED));
                writeln!(out, "seed {adopted}")?;
            }
            Command::Back => {
                if res.go_back() {
                    writeln!(out, "seed {}", res.seed())?;
                } else {
                    writeln!(out, "no earlier seed")?;
                }
            }
            Command::Forward => {
                if res.go_forward() {
                    writeln!(out, "seed {}", res.seed())?;
                } else {
                    writeln!(out, "no later seed")?;
                }
            }
            Command::Count(count) if count > MAX_COLOR_COUNT => {
                writeln!(out, "color_count must be at most {MAX_COLOR_COUNT}")?;
            }
            Command::Count(count) => {
                res.set_color_count(count);
                writeln!(out, "color_count = {count}")?;
            }
            Command::Unknown(input) => writeln!(out, "unknown command `{input}` (try `help`)")?,
        }
        Ok(Flow::Continue)
    }

    /// `set name=value`: parse the literal for the property's type, then
    /// write it through the registry.
    fn assign(&self, name: &str, text: &str, out: &mut impl Write) -> io::Result<()> {
        let res = &self.resource;
        let Some(descriptor) = res.registry().descriptor(name) else {
            return writeln!(out, "unknown property `{name}`");
        };
        if descriptor.is_read_only() {
            return writeln!(out, "`{name}` is read-only");
        }
        let Some(value) = parse_value(text, descriptor.variant_type) else {
            return writeln!(out, "cannot read `{text}` as {}", descriptor.variant_type);
        };
        if res.set(name, &value) {
            writeln!(out, "{name} = {}", format_value(&res.get(name)))
        } else {
            writeln!(out, "`{name}` rejected {}", format_value(&value))
        }
    }

    fn swatch(&self, color: Color) -> String {
        let hex = color.to_hex();
        if self.plain {
            return hex;
        }
        let (r, g, b) = color.to_rgb8();
        format!("\x1b[48;2;{r};{g};{b}m      \x1b[0m {hex}")
    }
}

/// One `list` line: name, type, hint, flags.
fn describe(d: &PropertyDescriptor, width: usize) -> String {
    let mut line = format!("{}  {}", pad(&d.name, width), d.variant_type);
    match d.hint {
        PropertyHint::None => {}
        PropertyHint::ToolButton => line.push_str(&format!("  [button: {}]", d.hint_string)),
        hint if d.hint_string.is_empty() => line.push_str(&format!("  [{hint:?}]")),
        hint => line.push_str(&format!("  [{hint:?}: {}]", d.hint_string)),
    }
    if d.is_read_only() {
        line.push_str("  (read-only)");
    }
    line
}

/// Left-align `s` in `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = parse_args(&args)?;
    let config = build_config(&opts)?;
    let resource = PaletteResource::new(&config)?;
    let host = Host::new(resource, opts.plain);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let flow = host.execute(parse_command(&line), &mut out)?;
        out.flush()?;
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("cosineful: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
