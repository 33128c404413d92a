extern crate slimcal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::app::App;
use lib::config::Config;
use lib::cursor::MonthCursor;
use lib::events::Dispatcher;
use lib::loader;
use lib::render::TextRenderer;
use lib::widget::Widget;
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;

fn parse_month(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month - 1),
        _ => Err(format!("'{}' is not a month between 1 and 12", s)),
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "slimcal",
    about = "slimcal - a month calendar for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "m",
        long = "metadata",
        help = "file or http(s) URL of the calendar data"
    )]
    pub metadata: Option<String>,

    #[structopt(long = "year", help = "year to show first", allow_hyphen_values = true)]
    pub year: Option<i32>,

    #[structopt(
        long = "month",
        help = "month to show first (1-12)",
        parse(try_from_str = parse_month)
    )]
    pub month: Option<u32>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn start_cursor(args: &Args) -> Option<MonthCursor> {
    if args.year.is_none() && args.month.is_none() {
        return None;
    }

    let current = MonthCursor::current();
    Some(MonthCursor::new(
        args.year.unwrap_or_else(|| current.year()),
        args.month.unwrap_or_else(|| current.month0()),
    ))
}

fn run_interactive(config: &Config, widget: Widget) -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        println!("slimcal ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let screen = AlternateScreen::from(stdout().into_raw_mode()?);
    let mut renderer = TextRenderer::new(screen, config.theme.clone()).fullscreen();
    write!(renderer.get_mut(), "{}", termion::cursor::Hide)?;

    let dispatcher = Dispatcher::from_config(config);
    let mut app = App::new(config, widget);
    let result = app.run(&dispatcher, &mut renderer);

    write!(renderer.get_mut(), "{}", termion::cursor::Show)?;
    result.map_err(|e| e.into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    } else if !args.show {
        // Log lines would scribble over the fullscreen calendar
        logger = logger.do_not_log();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let location = args.metadata.clone().unwrap_or_else(|| config.metadata.clone());
    let source = loader::source_for(&location);

    let mut theme = config.theme.clone();
    if args.show && !termion::is_tty(&io::stdout()) {
        theme.styled = false;
    }
    let mut renderer = TextRenderer::new(stdout(), theme);

    let mut widget = match Widget::load_or_report(source.as_ref(), &mut renderer)? {
        Some(widget) => widget,
        None => std::process::exit(1),
    };

    if let Some(cursor) = start_cursor(&args) {
        *widget.cursor_mut() = cursor;
    }

    if args.show {
        widget.draw(&mut renderer)?;
        Ok(())
    } else {
        run_interactive(&config, widget)
    }
}
