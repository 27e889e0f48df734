use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use humansize::{format_size, BINARY};

use crate::application::Outcome;
use crate::presentation::format_duration;

/// 日志记录器trait
pub trait LoggerTrait {
    fn is_enabled(&self) -> bool;
    fn log_message(&self, message: &str) -> Result<()>;
    fn log_load(&self, path: &Path, size: u64, records: usize) -> Result<()>;
    fn finalize(&self, outcome: &Outcome, duration: Duration) -> Result<()>;
}

/// 调试日志记录器，未启用时所有写入均为空操作
pub struct Logger {
    log_file: RefCell<Option<File>>,
    log_path: PathBuf,
    enabled: bool,
}

impl Logger {
    /// 创建新的日志记录器，日志文件写入 `directory`
    pub fn new(enabled: bool, directory: &Path) -> Result<Self> {
        if !enabled {
            return Ok(Self {
                log_file: RefCell::new(None),
                log_path: PathBuf::new(),
                enabled: false,
            });
        }

        // 获取当前时间作为文件名的一部分
        let now = Local::now();
        let timestamp = now.format("%Y%m%d_%H%M%S");
        let log_path = directory.join(format!("filter_users_{}.log", timestamp));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("cannot create log file: {}", log_path.display()))?;

        // 写入UTF-8 BOM以确保文件被正确识别为UTF-8
        file.write_all(&[0xEF, 0xBB, 0xBF])?;

        writeln!(file, "# filter-users debug log")?;
        writeln!(file, "# started: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "# --------------------------------------------")?;
        file.flush()?;

        Ok(Self {
            log_file: RefCell::new(Some(file)),
            log_path,
            enabled: true,
        })
    }

    /// 获取日志文件路径
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    fn write_line(&self, line: &str) -> Result<()> {
        if let Some(file) = self.log_file.borrow_mut().as_mut() {
            writeln!(file, "{}", line)?;
            file.flush()?;
        }
        Ok(())
    }
}

impl LoggerTrait for Logger {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn log_message(&self, message: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        self.write_line(&format!("[{}] {}", timestamp, message))
    }

    fn log_load(&self, path: &Path, size: u64, records: usize) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        self.write_line(&format!(
            "[{}] loaded: {} | size: {} | records: {}",
            timestamp,
            path.display(),
            format_size(size, BINARY),
            records
        ))
    }

    fn finalize(&self, outcome: &Outcome, duration: Duration) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let now = Local::now();
        self.write_line("# --------------------------------------------")?;
        self.write_line(&format!("# finished: {}", now.format("%Y-%m-%d %H:%M:%S")))?;
        self.write_line(&format!("# outcome: {}", outcome))?;
        self.write_line(&format!("# elapsed: {}", format_duration(duration)))?;
        self.write_line("# ============================================")?;

        eprintln!("Log saved to: {}", self.log_path.display());

        Ok(())
    }
}
