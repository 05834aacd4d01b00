//! Summary statistics over the audit log.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::warn;

use crate::audit::TIMESTAMP_FORMAT;
use crate::types::Verdict;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStats {
    pub total: usize,
    /// `YYYY-MM-DD` -> count
    pub daily: BTreeMap<String, usize>,
    /// `HH:00` -> count
    pub hourly: BTreeMap<String, usize>,
    pub verdicts: BTreeMap<Verdict, usize>,
    /// Share of VERIFIED lines, two decimals. `None` when there is no log yet.
    pub accuracy: Option<f64>,
    pub error_rate: Option<f64>,
}

impl Default for LogStats {
    fn default() -> Self {
        Self {
            total: 0,
            daily: BTreeMap::new(),
            hourly: BTreeMap::new(),
            verdicts: Verdict::ALL.into_iter().map(|v| (v, 0)).collect(),
            accuracy: None,
            error_rate: None,
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl LogStats {
    pub async fn from_path(path: &Path) -> io::Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(body) => Ok(Self::from_log(&body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn from_log(body: &str) -> Self {
        let mut stats = Self::default();
        for (lineno, line) in body.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((at, verdict)) => {
                    stats.total += 1;
                    *stats.daily.entry(at.format("%Y-%m-%d").to_string()).or_default() += 1;
                    *stats.hourly.entry(at.format("%H:00").to_string()).or_default() += 1;
                    *stats.verdicts.entry(verdict).or_default() += 1;
                }
                None => warn!(line = lineno + 1, "skipping malformed audit line"),
            }
        }

        let verified = stats.verdicts[&Verdict::Verified];
        let accuracy = if stats.total == 0 { 0.0 } else { round2(verified as f64 / stats.total as f64) };
        stats.accuracy = Some(accuracy);
        stats.error_rate = Some(round2(1.0 - accuracy));
        stats
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(self),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let pct = |x: Option<f64>| x.map_or("N/A".to_string(), |x| format!("{:.2}%", x * 100.0));
        let mut out = String::new();
        let _ = writeln!(out, "=== Prediction Report ===");
        let _ = writeln!(out, "Total predictions: {}", self.total);
        let _ = writeln!(out, "Accuracy: {}", pct(self.accuracy));
        let _ = writeln!(out, "Error rate: {}", pct(self.error_rate));
        let _ = writeln!(out, "\n-- Verdicts --");
        for (verdict, count) in &self.verdicts {
            let share = if self.total == 0 { 0.0 } else { *count as f64 * 100.0 / self.total as f64 };
            let _ = writeln!(out, "{verdict}: {count} ({share:.1}%)");
        }
        let _ = writeln!(out, "\n-- Daily activity --");
        for (day, count) in &self.daily {
            let _ = writeln!(out, "{day}: {count} predictions");
        }
        let _ = writeln!(out, "\n-- Hourly activity --");
        for (hour, count) in &self.hourly {
            let _ = writeln!(out, "{hour}: {count} predictions");
        }
        out
    }
}

fn parse_line(line: &str) -> Option<(NaiveDateTime, Verdict)> {
    let mut parts = line.splitn(3, '|');
    let stamp = parts.next()?.trim();
    let verdict = parts.next()?;
    parts.next()?;
    let at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    Some((at, Verdict::parse(verdict).unwrap_or(Verdict::Unverified)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
2024-03-09 14:05:00 | VERIFIED | council approves budget
2024-03-09 14:30:12 | FAKE | aliens | landed
2024-03-09 15:00:00 | real | lowercase verdict
2024-03-10 09:00:00 | MAYBE | unknown verdict
not a log line
2024-13-40 99:00:00 | FAKE | bad timestamp

";

    #[test]
    fn aggregates_valid_lines() {
        let s = LogStats::from_log(LOG);
        assert_eq!(s.total, 4);
        assert_eq!(s.daily["2024-03-09"], 3);
        assert_eq!(s.daily["2024-03-10"], 1);
        assert_eq!(s.hourly["14:00"], 2);
        assert_eq!(s.verdicts[&Verdict::Fake], 1);
        assert_eq!(s.verdicts[&Verdict::Real], 1);
        assert_eq!(s.verdicts[&Verdict::Unverified], 1);
        assert_eq!(s.verdicts[&Verdict::Suspicious], 0);
        assert_eq!(s.accuracy, Some(0.25));
        assert_eq!(s.error_rate, Some(0.75));
    }

    #[test]
    fn empty_log_has_zero_accuracy() {
        let s = LogStats::from_log("");
        assert_eq!(s.total, 0);
        assert_eq!(s.verdicts.len(), Verdict::ALL.len());
        assert_eq!(s.accuracy, Some(0.0));
        assert_eq!(s.error_rate, Some(1.0));
    }

    #[tokio::test]
    async fn missing_file_is_empty_stats() {
        let s = LogStats::from_path(Path::new("/nonexistent/predictions.log")).await.unwrap();
        assert_eq!(s, LogStats::default());
        assert!(s.render(ReportFormat::Text).unwrap().contains("Accuracy: N/A"));
    }

    #[tokio::test]
    async fn reads_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.log");
        std::fs::write(&path, LOG).unwrap();
        assert_eq!(LogStats::from_path(&path).await.unwrap().total, 4);
    }

    #[test]
    fn json_report_uses_verdict_names() {
        let json = LogStats::from_log(LOG).render(ReportFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["verdicts"]["PARTIALLY_VERIFIED"], 0);
        assert_eq!(v["total"], 4);
    }

    #[test]
    fn text_report_lists_shares() {
        let text = LogStats::from_log(LOG).render(ReportFormat::Text).unwrap();
        assert!(text.contains("Total predictions: 4"));
        assert!(text.contains("Accuracy: 25.00%"));
        assert!(text.contains("FAKE: 1 (25.0%)"));
        assert!(text.contains("2024-03-09: 3 predictions"));
    }
}
