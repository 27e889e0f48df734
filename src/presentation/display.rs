use std::io::Write;

use anyhow::Result;

use crate::domain::User;

/// 没有匹配结果时的提示
pub const NO_MATCHES: &str = "No matching users found.";

/// 格式化持续时间
pub fn format_duration(duration: std::time::Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}.{:03}s", secs, duration.subsec_millis())
    }
}

/// 输出筛选结果，每条记录一行，保持原有顺序
pub fn write_results<W: Write>(out: &mut W, results: &[&User]) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "{}", NO_MATCHES)?;
        return Ok(());
    }

    for user in results {
        writeln!(out, "{}", user)?;
    }

    Ok(())
}
