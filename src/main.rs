mod app;
mod cli;
mod error;
mod event;
mod logging;
mod model;
mod storage;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};

use clap::Parser;
use ratatui::DefaultTerminal;

use app::{App, Store};
use cli::{Cli, Commands};
use error::TaskpadError;
use model::TaskStore;
use storage::config::{self, Config};
use storage::{FileStorage, KeyValueStorage};

/// 启动 TUI 界面
fn run_tui(data_dir: PathBuf, config: Config) -> io::Result<()> {
    let storage: Box<dyn KeyValueStorage> = Box::new(FileStorage::new(&data_dir));
    let store: Store = TaskStore::load(storage, config.storage.key.clone());

    // 初始化终端
    let mut terminal = ratatui::init();

    let mut app = App::new(store, config, Some(data_dir));

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::handle_events(app)? {
            break;
        }
    }
    tracing::info!("Exiting with {} tasks", app.store.len());
    Ok(())
}

/// 打开文件存储上的任务列表（非交互子命令使用）
fn open_store(data_dir: &Path, config: &Config) -> TaskStore<FileStorage> {
    TaskStore::load(FileStorage::new(data_dir), config.storage.key.clone())
}

fn main() -> io::Result<()> {
    // Enable backtraces by default so panics show call stacks
    if std::env::var("RUST_BACKTRACE").is_err() {
        // SAFETY: called at the very start of main, before any other threads
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
    }

    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(storage::default_data_dir);
    let (config, config_err) = config::load_config(&data_dir);

    // 日志只写文件，guard 需要活到 main 结束
    let log_guard = logging::init_logging(&data_dir, &config.log.level);
    if let Some(e) = config_err {
        tracing::warn!("Ignoring unreadable config, using defaults: {}", e);
    }

    let command = cli.command.unwrap_or(Commands::Tui);
    if command == Commands::Tui {
        return run_tui(data_dir, config);
    }

    let mut out = io::stdout().lock();
    let result = match command {
        Commands::Tui => Ok(()),
        Commands::List { filter } => {
            cli::tasks::list(&open_store(&data_dir, &config), filter, &mut out)
                .map_err(TaskpadError::from)
        }
        Commands::Add { text, date } => {
            cli::tasks::add(&mut open_store(&data_dir, &config), &text, &date, &mut out)
                .map(|_| ())
        }
        Commands::Toggle { id } => {
            cli::tasks::toggle(&mut open_store(&data_dir, &config), id, &mut out)
                .map_err(TaskpadError::from)
        }
        Commands::Delete { id } => {
            cli::tasks::delete(&mut open_store(&data_dir, &config), id, &mut out)
                .map_err(TaskpadError::from)
        }
    };

    if let Err(e) = result {
        tracing::warn!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        // exit 不会运行析构，先刷新日志
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}
