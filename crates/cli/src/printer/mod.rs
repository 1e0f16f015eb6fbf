use std::io::{self, Write};

use ftpdeploy_listing::{Entry, ListingStyle};
use ftpdeploy_remote::join_remote;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Print the trailing summary to stderr.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Static context about one printed listing.
#[derive(Debug)]
pub struct ListingPrintContext<'a> {
    /// Remote directory that was listed.
    pub path: &'a str,
    pub style: ListingStyle,
    /// Rows that will be printed.
    pub total: usize,
}

/// Streams parsed entries of a remote directory.
pub trait ListingPrinter {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &ListingPrintContext) -> io::Result<()>;

    fn print_row(&mut self, entry: &Entry, ctx: &ListingPrintContext) -> io::Result<()>;

    /// Called once after all rows are printed.
    fn finish(&mut self, ctx: &ListingPrintContext) -> io::Result<()>;
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` color means no color here; the writers may not be a TTY.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[inline]
    fn format_name(&self, entry: &Entry) -> String {
        if self.use_color && entry.is_directory {
            format!("\x1b[1;34m{}\x1b[0m", entry.name)
        } else {
            entry.name.clone()
        }
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

/// Build the printer for `cfg.format` on stdout/stderr.
pub fn make_printer(cfg: PrinterConfig) -> Box<dyn ListingPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::<io::Stdout, io::Stderr>::stdout(cfg)),
    }
}

impl<W: Write, E: Write> ListingPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListingPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, entry: &Entry, _ctx: &ListingPrintContext) -> io::Result<()> {
        let kind = if entry.is_directory { 'd' } else { '-' };
        let modified = if entry.modified.is_valid() {
            entry.modified.to_string()
        } else {
            "-".to_string()
        };
        let name = self.format_name(entry);

        writeln!(
            self.out,
            "{}{:<9}  {:<10}  {:<16}  {}",
            kind,
            entry.permissions.as_str(),
            entry.owner.as_deref().unwrap_or("-"),
            modified,
            name
        )
    }

    fn finish(&mut self, ctx: &ListingPrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            writeln!(
                self.err,
                "\n[list] {} entries in {} ({} listing)",
                ctx.total, ctx.path, ctx.style
            )?;
        }
        Ok(())
    }
}

impl<W: Write, E: Write> ListingPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListingPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, entry: &Entry, ctx: &ListingPrintContext) -> io::Result<()> {
        let mut obj = serde_json::to_value(entry).map_err(io::Error::other)?;
        if let Some(map) = obj.as_object_mut() {
            map.insert(
                "path".to_string(),
                join_remote(ctx.path, &entry.name).into(),
            );
        }
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &ListingPrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "path": ctx.path,
                "style": ctx.style,
                "total": ctx.total,
            });
            writeln!(self.err, "{}", obj)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
