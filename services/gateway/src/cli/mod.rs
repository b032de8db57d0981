//! gateway CLI 分发：`run`、`doctor`、`version`、`help`。

use anyhow::anyhow;

use crate::{config::GatewayConfig, logging::resolve_log_dir};

/// 仓库自带的凭证种子文件（相对 crate 根目录）。
const SEED_CREDENTIALS: &str = "seed/credentials.json";
/// 仓库自带的用户种子文件（相对 crate 根目录）。
const SEED_USERS: &str = "seed/users.json";

/// CLI 分发结果。
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CliDispatch {
    /// 继续启动 HTTP 服务。
    Run,
    /// 命令已处理完成，主程序应退出。
    Exit,
}

/// 解析并执行 gateway CLI。
pub(crate) fn dispatch(args: &[String]) -> anyhow::Result<CliDispatch> {
    let Some(first) = args.first() else {
        return Ok(CliDispatch::Run);
    };

    let cmd = first.trim();
    if cmd.is_empty() || cmd == "run" {
        return Ok(CliDispatch::Run);
    }

    match cmd {
        "-h" | "--help" | "help" => {
            print_root_help();
            Ok(CliDispatch::Exit)
        }
        "doctor" => {
            let format = parse_doctor_format(&args[1..])?;
            println!("{}", render_doctor(&GatewayConfig::from_env(), format)?);
            Ok(CliDispatch::Exit)
        }
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(CliDispatch::Exit)
        }
        other => Err(anyhow!(
            "unknown command: {other}; run `sg-gateway --help` for usage"
        )),
    }
}

/// `doctor` 输出格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DoctorFormat {
    Text,
    Json,
}

/// 解析 doctor 的 `--format` 参数。
fn parse_doctor_format(args: &[String]) -> anyhow::Result<DoctorFormat> {
    if args.is_empty() {
        return Ok(DoctorFormat::Text);
    }
    if args.len() == 2 && args[0] == "--format" {
        return match args[1].as_str() {
            "text" => Ok(DoctorFormat::Text),
            "json" => Ok(DoctorFormat::Json),
            other => Err(anyhow!("unsupported doctor format: {other}")),
        };
    }
    Err(anyhow!("usage: sg-gateway doctor [--format text|json]"))
}

/// 渲染生效配置。
fn render_doctor(config: &GatewayConfig, format: DoctorFormat) -> anyhow::Result<String> {
    let display = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    match format {
        DoctorFormat::Text => Ok([
            format!("addr: {}", config.addr),
            format!("credentials: {}", display(&config.credentials_path)),
            format!("users: {}", display(&config.users_path)),
            format!(
                "token-store: {}",
                config
                    .token_store_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "memory".to_string())
            ),
            format!("log-dir: {}", resolve_log_dir().display()),
        ]
        .join("\n")),
        DoctorFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}

/// 打印 root help。
fn print_root_help() {
    println!("sg-gateway usage:");
    println!("  sg-gateway run");
    println!("  sg-gateway doctor [--format text|json]");
    println!("  sg-gateway version");
    println!();
    println!("sample seeds: {SEED_CREDENTIALS}, {SEED_USERS}");
    println!("  SG_CREDENTIALS_PATH={SEED_CREDENTIALS} SG_USERS_PATH={SEED_USERS} sg-gateway run");
}
