use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::loader::load_users;
use crate::domain::FilterKind;
use crate::infrastructure::LoggerTrait;
use crate::presentation::write_results;

/// 选择筛选方式时的提示语
pub const OPTION_PROMPT: &str = "Filter by 'name', 'age', or 'email': ";

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 数据文件加载失败，未进入交互
    LoadFailed,
    /// 不支持的筛选方式（规范化后的输入）
    Unsupported(String),
    /// 完成一次筛选
    Filtered { kind: FilterKind, matches: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::LoadFailed => write!(f, "data file could not be loaded"),
            Outcome::Unsupported(option) => write!(f, "unsupported option {:?}", option),
            Outcome::Filtered { kind, matches } => {
                write!(f, "{} filter matched {} user(s)", kind, matches)
            }
        }
    }
}

/// 执行一次交互式筛选：加载、选择方式、输入查询、输出结果
///
/// 加载失败、查询格式无效和不支持的方式都只打印提示，不作为错误返回；
/// 只有读写终端失败才会返回 `Err`。
pub fn run<R, W>(data_file: &Path, mut input: R, mut output: W, logger: &dyn LoggerTrait) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    let users = match load_users(data_file, logger) {
        Ok(users) => users,
        Err(err) => {
            writeln!(output, "{}", err)?;
            if logger.is_enabled() {
                let class = if err.is_format() { "format" } else { "io" };
                let _ = logger.log_message(&format!("load failed ({}): {}", class, err));
            }
            return Ok(Outcome::LoadFailed);
        }
    };

    let option = prompt(&mut input, &mut output, OPTION_PROMPT)?;
    let kind = match option.parse::<FilterKind>() {
        Ok(kind) => kind,
        Err(err) => {
            writeln!(output, "{}", err)?;
            return Ok(Outcome::Unsupported(err.0));
        }
    };

    if logger.is_enabled() {
        let _ = logger.log_message(&format!("option: {}", kind));
    }

    let query = prompt(&mut input, &mut output, kind.prompt())?;
    let results = match kind.apply(&users, &query) {
        Ok(results) => results,
        Err(err) => {
            writeln!(output, "{}", err)?;
            if logger.is_enabled() {
                let _ = logger.log_message(&format!("invalid query {:?}: {}", query, err));
            }
            Vec::new()
        }
    };

    write_results(&mut output, &results)?;
    output.flush()?;

    Ok(Outcome::Filtered {
        kind,
        matches: results.len(),
    })
}

/// 打印提示并读取一行，去掉首尾空白。输入结束时返回空字符串
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<String> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read from standard input")?;

    Ok(line.trim().to_string())
}
