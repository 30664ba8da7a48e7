//! Simulation report generation.

use super::runner::GameRun;
use crate::ai::AiParams;
use crate::difficulty::{skill_label, DifficultyMode};
use crate::game::GameOutcome;

/// Aggregated results from a batch of simulated games.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_games: u32,
    pub player_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
    pub timeouts: u32,

    // Aggregated stats
    pub avg_player_score: f64,
    pub avg_ai_score: f64,
    pub avg_ticks: f64,
    pub avg_survival_secs: f64,

    // Distribution data
    pub score_distribution: Vec<u32>,

    // Difficulty state after the final game
    pub mode: DifficultyMode,
    pub final_speed_ms: u64,
    pub final_aggression: f64,
    pub final_mistake_rate: f64,
    pub estimated_skill: u32,

    // Individual runs for detailed analysis
    pub runs: Vec<GameRun>,
}

impl SimReport {
    /// Create a report from completed game runs.
    pub fn from_runs(
        runs: Vec<GameRun>,
        mode: DifficultyMode,
        final_params: AiParams,
        estimated_skill: u32,
    ) -> Self {
        let num_games = runs.len() as u32;
        let denom = num_games.max(1) as f64;

        let player_wins = runs
            .iter()
            .filter(|r| r.outcome == Some(GameOutcome::PlayerWin))
            .count() as u32;
        let ai_wins = runs
            .iter()
            .filter(|r| r.outcome == Some(GameOutcome::AiWin))
            .count() as u32;
        let draws = runs
            .iter()
            .filter(|r| r.outcome == Some(GameOutcome::Draw))
            .count() as u32;
        let timeouts = runs.iter().filter(|r| r.timed_out).count() as u32;

        let avg_player_score = runs.iter().map(|r| r.score as f64).sum::<f64>() / denom;
        let avg_ai_score = runs.iter().map(|r| r.ai_score as f64).sum::<f64>() / denom;
        let avg_ticks = runs.iter().map(|r| r.ticks as f64).sum::<f64>() / denom;
        let avg_survival_secs =
            runs.iter().map(|r| r.survival_ms as f64 / 1000.0).sum::<f64>() / denom;

        let score_distribution: Vec<u32> = runs.iter().map(|r| r.score).collect();

        Self {
            num_games,
            player_wins,
            ai_wins,
            draws,
            timeouts,
            avg_player_score,
            avg_ai_score,
            avg_ticks,
            avg_survival_secs,
            score_distribution,
            mode,
            final_speed_ms: final_params.speed_ms,
            final_aggression: final_params.aggression,
            final_mistake_rate: final_params.mistake_rate,
            estimated_skill,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();
        let denom = self.num_games.max(1) as f64;

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                     SNAKE BALANCE REPORT\n");
        report.push_str("                (Real Sessions, Local AI Only)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Games: {} total, {} player wins, {} ai wins, {} draws, {} timeouts\n\n",
            self.num_games, self.player_wins, self.ai_wins, self.draws, self.timeouts
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        for (label, count) in [
            ("Player Wins", self.player_wins),
            ("AI Wins", self.ai_wins),
            ("Draws", self.draws),
            ("Timeouts", self.timeouts),
        ] {
            let pct = (count as f64 / denom) * 100.0;
            let bar_len = (pct / 5.0) as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!("  {:<12} {:>5.1}% {}\n", label, pct, bar));
        }
        report.push('\n');

        report.push_str("── SCORING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Player Score:   {:.1}\n",
            self.avg_player_score
        ));
        report.push_str(&format!("  Avg AI Score:       {:.1}\n", self.avg_ai_score));

        let min_score = self.score_distribution.iter().min().unwrap_or(&0);
        let max_score = self.score_distribution.iter().max().unwrap_or(&0);
        let median_score = {
            let mut sorted = self.score_distribution.clone();
            sorted.sort();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        report.push_str(&format!(
            "  Player Score Range: {} / {} / {} (min / median / max)\n\n",
            min_score, median_score, max_score
        ));

        report.push_str("── PACE ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Ticks per Game: {:.0}\n", self.avg_ticks));
        report.push_str(&format!(
            "  Avg Survival:       {:.1}s\n\n",
            self.avg_survival_secs
        ));

        report.push_str("── DIFFICULTY ───────────────────────────────────────────────────\n");
        report.push_str(&format!("  Mode:               {}\n", self.mode.name()));
        report.push_str(&format!("  Final Speed:        {}ms\n", self.final_speed_ms));
        report.push_str(&format!(
            "  Final Aggression:   {:.2}\n",
            self.final_aggression
        ));
        report.push_str(&format!(
            "  Final Mistake Rate: {:.2}\n",
            self.final_mistake_rate
        ));
        report.push_str(&format!(
            "  Estimated Skill:    {}% ({})\n\n",
            self.estimated_skill,
            skill_label(self.estimated_skill)
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let win_rate = (self.player_wins as f64 / denom) * 100.0;
        let matchup = if win_rate < 20.0 {
            "AI DOMINANT - players rarely win"
        } else if win_rate < 45.0 {
            "AI FAVORED - uphill fight for the player"
        } else if win_rate < 65.0 {
            "GOOD - competitive matchup"
        } else if win_rate < 85.0 {
            "PLAYER FAVORED - AI seldom threatens"
        } else {
            "PLAYER DOMINANT - AI is free food"
        };
        report.push_str(&format!("  Player Win Rate: {:.1}%\n", win_rate));
        report.push_str(&format!("  Matchup Rating:  {}\n", matchup));

        let timeout_rate = (self.timeouts as f64 / denom) * 100.0;
        if timeout_rate > 10.0 {
            report.push_str(&format!(
                "  ⚠️  {:.0}% of games hit the tick cap - stalemate loops?\n",
                timeout_rate
            ));
        }
        let draw_rate = (self.draws as f64 / denom) * 100.0;
        if draw_rate > 10.0 {
            report.push_str("  ⚠️  Head-to-head draws unusually common\n");
        }
        if self.avg_ticks < 20.0 {
            report.push_str("  ⚠️  Games end almost immediately - spawns too hot?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// Implement Serialize for JSON output
impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 15)?;
        state.serialize_field("num_games", &self.num_games)?;
        state.serialize_field("player_wins", &self.player_wins)?;
        state.serialize_field("ai_wins", &self.ai_wins)?;
        state.serialize_field("draws", &self.draws)?;
        state.serialize_field("timeouts", &self.timeouts)?;
        state.serialize_field(
            "player_win_rate",
            &(self.player_wins as f64 / self.num_games.max(1) as f64),
        )?;
        state.serialize_field("avg_player_score", &self.avg_player_score)?;
        state.serialize_field("avg_ai_score", &self.avg_ai_score)?;
        state.serialize_field("avg_ticks", &self.avg_ticks)?;
        state.serialize_field("avg_survival_secs", &self.avg_survival_secs)?;
        state.serialize_field("mode", &self.mode)?;
        state.serialize_field("final_speed_ms", &self.final_speed_ms)?;
        state.serialize_field("final_aggression", &self.final_aggression)?;
        state.serialize_field("final_mistake_rate", &self.final_mistake_rate)?;
        state.serialize_field("estimated_skill", &self.estimated_skill)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(outcome: Option<GameOutcome>, score: u32, ai_score: u32, ticks: u64) -> GameRun {
        GameRun {
            outcome,
            score,
            ai_score,
            ticks,
            survival_ms: ticks * 150,
            timed_out: outcome.is_none(),
        }
    }

    #[test]
    fn test_report_aggregates_runs() {
        let runs = vec![
            run(Some(GameOutcome::PlayerWin), 8, 3, 200),
            run(Some(GameOutcome::AiWin), 2, 6, 120),
            run(None, 5, 5, 1000),
            run(Some(GameOutcome::Draw), 4, 4, 90),
        ];

        let report = SimReport::from_runs(runs, DifficultyMode::Medium, AiParams::default(), 50);

        assert_eq!(report.num_games, 4);
        assert_eq!(report.player_wins, 1);
        assert_eq!(report.ai_wins, 1);
        assert_eq!(report.draws, 1);
        assert_eq!(report.timeouts, 1);
        assert!((report.avg_player_score - 4.75).abs() < 1e-9);
        assert!((report.avg_ticks - 352.5).abs() < 1e-9);
    }

    #[test]
    fn test_text_and_json_render() {
        let runs = vec![run(Some(GameOutcome::PlayerWin), 10, 1, 300)];
        let report = SimReport::from_runs(runs, DifficultyMode::Hard, AiParams::default(), 72);

        let text = report.to_text();
        assert!(text.contains("SNAKE BALANCE REPORT"));
        assert!(text.contains("BALANCE ASSESSMENT"));
        assert!(text.contains("PLAYER DOMINANT"));

        let json = report.to_json();
        assert!(json.contains("\"player_wins\": 1"));
        assert!(json.contains("\"estimated_skill\": 72"));
    }
}
