// ==========================================
// 现场服务呼叫台 - 命令行入口
// ==========================================
// 用法:
//   service-call-desk <site_id> <system_id> <reason_id> [now]
//
// 对默认数据库中的站点系统评估合同覆盖,以 JSON 输出评估结果与提示信息。
// now 缺省为当前时间,格式同合同日期（RFC 3339 / YYYY-MM-DD 等）。
// ==========================================

use anyhow::{Context, Result};
use chrono::Utc;
use service_call_desk::app::{get_default_db_path, AppState};
use service_call_desk::domain::parse_contract_date;
use serde_json::json;

fn main() -> Result<()> {
    service_call_desk::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("{} v{}", service_call_desk::APP_NAME, service_call_desk::VERSION);
        eprintln!("用法: service-call-desk <site_id> <system_id> <reason_id> [now]");
        std::process::exit(2);
    }

    let now = match args.get(3) {
        Some(raw) => parse_contract_date("now", raw).with_context(|| format!("无法解析时间: {}", raw))?,
        None => Utc::now(),
    };

    let state = AppState::new(get_default_db_path()).map_err(anyhow::Error::msg)?;
    tracing::info!("使用数据库: {}", state.db_path);

    let api = &state.call_entry_api;
    let mut form = api.new_form()?;
    api.select_site(&mut form, Some(&args[0]), now)?;
    api.select_system(&mut form, Some(&args[1]), now)?;
    let evaluation = api.select_reason(&mut form, Some(&args[2]), now)?;
    let advisory = api.advisory(&form)?;

    let output = json!({
        "now": now.to_rfc3339(),
        "evaluation": evaluation,
        "chargeable": form.chargeable,
        "advisory": advisory,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("评估结果序列化失败")?
    );
    Ok(())
}
