// ==========================================
// 交接班设备点检系统 - 命令行主入口
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

use shift_handover::app::{execute, get_default_db_path, AppState, Cli, OutputOptions};
use shift_handover::{logging, ApiError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_format(cli.log_json);

    tracing::debug!("{} v{}", shift_handover::APP_NAME, shift_handover::VERSION);

    let json = cli.json;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ApiError>() {
                // 业务错误：按稳定错误码输出
                Some(api_err) if e.chain().count() == 1 => print_api_error(api_err, json),
                _ => eprintln!("错误: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = match &cli.db {
        Some(path) => path.to_string_lossy().to_string(),
        None => get_default_db_path(),
    };
    tracing::info!("使用数据库: {}", db_path);

    let mut state = AppState::new(db_path.clone())
        .with_context(|| format!("无法初始化应用状态: {}", db_path))?;

    let opts = OutputOptions::resolve(cli.locale.as_deref(), &state, cli.json)?;
    let output = execute(&mut state, cli.command, opts)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn print_api_error(err: &ApiError, json: bool) {
    if json {
        match serde_json::to_string(&err.to_response()) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("[{}] {}", err.code(), err),
        }
    } else {
        eprintln!("[{}] {}", err.code(), err);
    }
}
