//! AI回复解析：从自由文本中提取要点式的洞察
//!
//! 先按"Key Findings / Insights"等段落标题定位要点，遇到 Sources、References、
//! Next Steps、Applications 段落立即停止；段落解析一无所获时，退回到全文扫描带
//! 项目符号的行。

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{INSIGHT_MIN_LENGTH, MAX_INSIGHTS};

const INSIGHT_HEADER_CUES: [&str; 3] = ["key findings", "insights", "findings"];
const STOP_HEADER_CUES: [&str; 4] = ["sources", "references", "next steps", "applications"];
const BULLET_GLYPHS: [char; 3] = ['•', '-', '*'];

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid numbered prefix regex"));
static LEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[•\-*]|\d+\.)\s*").expect("valid marker regex"));
static LEADING_GLYPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[•\-*]\s*").expect("valid glyph regex"));

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResponse {
    pub insights: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ResponseParser {
    min_length: usize,
    max_insights: usize,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(INSIGHT_MIN_LENGTH, MAX_INSIGHTS)
    }
}

impl ResponseParser {
    pub fn new(min_length: usize, max_insights: usize) -> Self {
        Self {
            min_length,
            max_insights,
        }
    }

    pub fn parse(&self, text: &str) -> ParsedResponse {
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

        let mut insights = self.parse_sections(&lines);
        if insights.is_empty() {
            insights = self.parse_any_bullets(&lines);
        }
        insights.truncate(self.max_insights);

        ParsedResponse { insights }
    }

    fn parse_sections(&self, lines: &[&str]) -> Vec<String> {
        let mut insights = Vec::new();
        let mut capturing = false;

        for line in lines {
            let trimmed = line.trim();
            let lower = trimmed.to_lowercase();

            if contains_any(&lower, &INSIGHT_HEADER_CUES) {
                capturing = true;
                continue;
            }

            if capturing && contains_any(&lower, &STOP_HEADER_CUES) {
                break;
            }

            if capturing && is_list_item(trimmed) {
                let insight = LEADING_MARKER.replace(trimmed, "").trim().to_string();
                if self.is_substantial(&insight) {
                    insights.push(insight);
                }
            }
        }

        insights
    }

    /// 兜底：忽略段落边界，取前若干条含项目符号的行
    fn parse_any_bullets(&self, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .filter(|line| line.contains(BULLET_GLYPHS))
            .take(self.max_insights)
            .map(|line| LEADING_GLYPH.replace(line.trim(), "").trim().to_string())
            .filter(|insight| self.is_substantial(insight))
            .collect()
    }

    fn is_substantial(&self, insight: &str) -> bool {
        insight.chars().count() > self.min_length
    }
}

fn contains_any(lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lower.contains(cue))
}

fn is_list_item(trimmed: &str) -> bool {
    trimmed.starts_with(BULLET_GLYPHS) || NUMBERED_PREFIX.is_match(trimmed)
}
