//! Event-driven game commentary in a 90s game-show register.
//!
//! Events carry a priority; a cooldown keeps the chatter down, and
//! only critical events (game endings) may interrupt it. Lines come
//! from the remote completion endpoint when one is configured, with a
//! canned pool per event as the offline fallback.

use std::collections::VecDeque;
use std::time::Instant;

use rand::Rng;

use crate::ai::remote::RemoteMoveClient;
use crate::constants::{
    COMMENT_COOLDOWN_MS, COMMENT_MAX_LEN, COMMENT_MAX_TOKENS, COMMENT_TEMPERATURE,
    SCORE_MILESTONE_INTERVAL,
};
use crate::grid::{Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommentPriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentEvent {
    PlayerEat,
    AiEat,
    ScoreMilestone,
    NearMiss,
    PlayerWin,
    AiWin,
    Draw,
    Comeback,
}

impl CommentEvent {
    pub const ALL: [CommentEvent; 8] = [
        CommentEvent::PlayerEat,
        CommentEvent::AiEat,
        CommentEvent::ScoreMilestone,
        CommentEvent::NearMiss,
        CommentEvent::PlayerWin,
        CommentEvent::AiWin,
        CommentEvent::Draw,
        CommentEvent::Comeback,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommentEvent::PlayerEat => "PLAYER_EAT",
            CommentEvent::AiEat => "AI_EAT",
            CommentEvent::ScoreMilestone => "SCORE_MILESTONE",
            CommentEvent::NearMiss => "NEAR_MISS",
            CommentEvent::PlayerWin => "PLAYER_WIN",
            CommentEvent::AiWin => "AI_WIN",
            CommentEvent::Draw => "DRAW",
            CommentEvent::Comeback => "COMEBACK",
        }
    }

    pub fn priority(&self) -> CommentPriority {
        match self {
            CommentEvent::PlayerEat | CommentEvent::AiEat => CommentPriority::Medium,
            CommentEvent::ScoreMilestone | CommentEvent::Comeback => CommentPriority::High,
            CommentEvent::NearMiss => CommentPriority::Low,
            CommentEvent::PlayerWin | CommentEvent::AiWin | CommentEvent::Draw => {
                CommentPriority::Critical
            }
        }
    }

    pub fn fallback_lines(&self) -> &'static [&'static str] {
        match self {
            CommentEvent::PlayerEat => &[
                "Nice catch!",
                "Score! Keep it up!",
                "Nom nom nom!",
                "That's how it's done!",
                "Radical move!",
                "Totally awesome!",
            ],
            CommentEvent::AiEat => &[
                "AI strikes back!",
                "Competition heating up!",
                "The AI is hungry too!",
                "Bogus! AI scored!",
                "Don't have a cow, man!",
            ],
            CommentEvent::ScoreMilestone => &[
                "Milestone reached!",
                "You're on fire!",
                "Impressive score!",
                "That's totally tubular!",
                "All that and a bag of chips!",
            ],
            CommentEvent::NearMiss => &[
                "Whoa, close call!",
                "That was close!",
                "Watch out!",
                "Almost pulled a Titanic there!",
                "Close but no cigar!",
            ],
            CommentEvent::PlayerWin => &[
                "Victory! Well played!",
                "You win! Champion!",
                "Game over - You won!",
                "PLAYER WINS! That was phat!",
                "You're the bomb!",
            ],
            CommentEvent::AiWin => &[
                "AI wins this round.",
                "Better luck next time!",
                "The AI got you!",
                "Bogus! AI takes it.",
                "Don't sweat it, dude!",
            ],
            CommentEvent::Draw => &[
                "It's a draw!",
                "Both down! Tie game!",
                "Mutual destruction!",
                "Plot twist! It's a tie!",
                "Both snakes bit the dust!",
            ],
            CommentEvent::Comeback => &[
                "Plot twist! Underdog takes the lead!",
                "Comeback city!",
                "The tables have turned!",
                "What a turnaround!",
                "From zero to hero!",
            ],
        }
    }
}

/// Score and obstacle context for prompt construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentContext {
    pub player_score: u32,
    pub ai_score: u32,
    pub obstacle: Option<&'static str>,
}

/// Produces at most one line per event, subject to the cooldown.
pub struct CommentaryEngine {
    pub enabled: bool,
    remote: Option<RemoteMoveClient>,
    last_comment_at: Option<Instant>,
}

impl CommentaryEngine {
    pub fn new(enabled: bool, remote: Option<RemoteMoveClient>) -> Self {
        CommentaryEngine {
            enabled,
            remote,
            last_comment_at: None,
        }
    }

    /// A line for the event, or `None` when commentary is disabled or
    /// a non-critical event lands inside the cooldown. Accepting an
    /// event restarts the cooldown even if the remote source fails.
    pub fn comment_on<R: Rng>(
        &mut self,
        event: CommentEvent,
        ctx: &CommentContext,
        now: Instant,
        rng: &mut R,
    ) -> Option<String> {
        if !self.enabled {
            return None;
        }
        if event.priority() != CommentPriority::Critical {
            if let Some(at) = self.last_comment_at {
                if now.duration_since(at).as_millis() < COMMENT_COOLDOWN_MS as u128 {
                    return None;
                }
            }
        }
        self.last_comment_at = Some(now);

        let line = self
            .remote_line(event, ctx)
            .unwrap_or_else(|| fallback_line(event, rng));
        Some(line)
    }

    fn remote_line(&self, event: CommentEvent, ctx: &CommentContext) -> Option<String> {
        let client = self.remote.as_ref()?;
        let prompt = build_commentary_prompt(event, ctx);
        match client.complete(&prompt, COMMENT_TEMPERATURE, COMMENT_MAX_TOKENS) {
            Ok(text) => parse_commentary_response(&text),
            Err(_) => None,
        }
    }
}

/// Random canned line for the event.
pub fn fallback_line<R: Rng>(event: CommentEvent, rng: &mut R) -> String {
    let lines = event.fallback_lines();
    lines[rng.gen_range(0..lines.len())].to_string()
}

pub fn build_commentary_prompt(event: CommentEvent, ctx: &CommentContext) -> String {
    format!(
        "You are a witty 1990s video game show host commentating on a Snake game.\n\
         \n\
         Event: {}\n\
         Details: {}\n\
         Score: Player {} - AI {}\n\
         \n\
         Generate a short, funny comment (10-15 words max).\n\
         Requirements:\n\
         - Use 90s slang (radical, tubular, bogus, all that, phat, etc.)\n\
         - Match the energy of the event\n\
         - Keep it family-friendly\n\
         - Be enthusiastic and fun\n\
         \n\
         Reply with just the commentary text, no quotes or extra formatting.",
        event.name(),
        event_details(event, ctx),
        ctx.player_score,
        ctx.ai_score,
    )
}

fn event_details(event: CommentEvent, ctx: &CommentContext) -> String {
    match event {
        CommentEvent::PlayerEat => format!(
            "Player just scored! Now has {} points.",
            ctx.player_score
        ),
        CommentEvent::AiEat => format!(
            "AI just scored! Now has {} points. Tease the player.",
            ctx.ai_score
        ),
        CommentEvent::ScoreMilestone => format!(
            "Player hit {} points! Big milestone!",
            ctx.player_score
        ),
        CommentEvent::NearMiss => format!(
            "Player almost crashed into {}! Close call!",
            ctx.obstacle.unwrap_or("something")
        ),
        CommentEvent::PlayerWin => format!(
            "Player won with {} points! Celebrate!",
            ctx.player_score
        ),
        CommentEvent::AiWin => format!(
            "AI won with {} points. Console the player.",
            ctx.ai_score
        ),
        CommentEvent::Draw => "Both snakes crashed! It's a tie!".to_string(),
        CommentEvent::Comeback => "Trailing player just took the lead!".to_string(),
    }
}

/// Clean up a remote reply: trim, drop one surrounding quote pair, cap
/// the length. `None` when nothing usable remains.
pub fn parse_commentary_response(text: &str) -> Option<String> {
    const QUOTES: &[char] = &['"', '\''];
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix(QUOTES).unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(QUOTES).unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > COMMENT_MAX_LEN {
        let cut: String = trimmed.chars().take(COMMENT_MAX_LEN - 3).collect();
        return Some(format!("{}...", cut));
    }
    Some(trimmed.to_string())
}

/// Scan the four cells around the head after a collision-free tick.
/// The segment directly behind the head is always adjacent, so the
/// scan starts at the third segment.
pub fn detect_near_miss(body: &VecDeque<Position>, grid_size: i16) -> Option<&'static str> {
    let head = *body.front()?;
    for dir in Direction::ALL {
        let check = head.step(dir);
        if !check.in_bounds(grid_size) {
            return Some("wall");
        }
        if body.iter().skip(2).any(|&seg| seg == check) {
            return Some("self");
        }
    }
    None
}

/// True at every score-milestone boundary.
pub fn is_milestone(score: u32) -> bool {
    score > 0 && score % SCORE_MILESTONE_INTERVAL == 0
}

/// True when the player flips from strictly behind to strictly ahead.
pub fn is_comeback(prev_player: u32, prev_ai: u32, player: u32, ai: u32) -> bool {
    prev_player < prev_ai && player > ai
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn body(cells: &[(i16, i16)]) -> VecDeque<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn test_priorities() {
        assert_eq!(CommentEvent::PlayerEat.priority(), CommentPriority::Medium);
        assert_eq!(CommentEvent::AiEat.priority(), CommentPriority::Medium);
        assert_eq!(
            CommentEvent::ScoreMilestone.priority(),
            CommentPriority::High
        );
        assert_eq!(CommentEvent::NearMiss.priority(), CommentPriority::Low);
        assert_eq!(CommentEvent::PlayerWin.priority(), CommentPriority::Critical);
        assert_eq!(CommentEvent::AiWin.priority(), CommentPriority::Critical);
        assert_eq!(CommentEvent::Draw.priority(), CommentPriority::Critical);
        assert_eq!(CommentEvent::Comeback.priority(), CommentPriority::High);
    }

    #[test]
    fn test_cooldown_suppresses_non_critical() {
        let mut engine = CommentaryEngine::new(true, None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ctx = CommentContext::default();
        let t0 = Instant::now();

        assert!(engine
            .comment_on(CommentEvent::PlayerEat, &ctx, t0, &mut rng)
            .is_some());
        assert!(engine
            .comment_on(
                CommentEvent::AiEat,
                &ctx,
                t0 + Duration::from_millis(3000),
                &mut rng
            )
            .is_none());
        assert!(engine
            .comment_on(
                CommentEvent::AiEat,
                &ctx,
                t0 + Duration::from_millis(6000),
                &mut rng
            )
            .is_some());
    }

    #[test]
    fn test_critical_overrides_cooldown() {
        let mut engine = CommentaryEngine::new(true, None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ctx = CommentContext::default();
        let t0 = Instant::now();

        engine.comment_on(CommentEvent::PlayerEat, &ctx, t0, &mut rng);
        let line = engine.comment_on(
            CommentEvent::PlayerWin,
            &ctx,
            t0 + Duration::from_millis(1000),
            &mut rng,
        );
        assert!(line.is_some());
        assert!(CommentEvent::PlayerWin
            .fallback_lines()
            .contains(&line.unwrap().as_str()));
    }

    #[test]
    fn test_disabled_engine_stays_quiet() {
        let mut engine = CommentaryEngine::new(false, None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ctx = CommentContext::default();
        assert!(engine
            .comment_on(CommentEvent::Draw, &ctx, Instant::now(), &mut rng)
            .is_none());
    }

    #[test]
    fn test_fallback_lines_come_from_the_event_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for event in CommentEvent::ALL {
            for _ in 0..10 {
                let line = fallback_line(event, &mut rng);
                assert!(event.fallback_lines().contains(&line.as_str()));
            }
        }
    }

    #[test]
    fn test_parse_strips_one_quote_pair() {
        assert_eq!(
            parse_commentary_response("\"Radical!\""),
            Some("Radical!".to_string())
        );
        assert_eq!(
            parse_commentary_response("'Tubular.'"),
            Some("Tubular.".to_string())
        );
        assert_eq!(
            parse_commentary_response("\"\"nested\"\""),
            Some("\"nested\"".to_string())
        );
        assert_eq!(
            parse_commentary_response("  plain text  "),
            Some("plain text".to_string())
        );
    }

    #[test]
    fn test_parse_truncates_long_replies() {
        let long = "a".repeat(60);
        let parsed = parse_commentary_response(&long).unwrap();
        assert_eq!(parsed.chars().count(), COMMENT_MAX_LEN);
        assert!(parsed.ends_with("..."));
        assert!(parsed.starts_with(&"a".repeat(47)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_commentary_response("   "), None);
        assert_eq!(parse_commentary_response("\"\""), None);
    }

    #[test]
    fn test_prompt_carries_event_and_scores() {
        let ctx = CommentContext {
            player_score: 7,
            ai_score: 4,
            obstacle: Some("wall"),
        };
        let prompt = build_commentary_prompt(CommentEvent::NearMiss, &ctx);
        assert!(prompt.starts_with(
            "You are a witty 1990s video game show host commentating on a Snake game."
        ));
        assert!(prompt.contains("Event: NEAR_MISS"));
        assert!(prompt.contains("Details: Player almost crashed into wall! Close call!"));
        assert!(prompt.contains("Score: Player 7 - AI 4"));
        assert!(prompt.contains("Generate a short, funny comment (10-15 words max)."));
    }

    #[test]
    fn test_near_miss_ignores_the_neck() {
        // Straight snake in open space: only the neck is adjacent.
        let straight = body(&[(10, 10), (9, 10), (8, 10)]);
        assert_eq!(detect_near_miss(&straight, 20), None);
    }

    #[test]
    fn test_near_miss_reports_wall() {
        let at_top = body(&[(5, 0), (5, 1), (5, 2)]);
        assert_eq!(detect_near_miss(&at_top, 20), Some("wall"));
    }

    #[test]
    fn test_near_miss_reports_coiled_body() {
        // After a U-turn the fourth segment sits next to the head.
        let coiled = body(&[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)]);
        assert_eq!(detect_near_miss(&coiled, 20), Some("self"));
    }

    #[test]
    fn test_milestones() {
        assert!(!is_milestone(0));
        assert!(!is_milestone(4));
        assert!(is_milestone(5));
        assert!(!is_milestone(7));
        assert!(is_milestone(10));
    }

    #[test]
    fn test_comeback_requires_a_lead_flip() {
        assert!(is_comeback(1, 3, 4, 3));
        assert!(!is_comeback(3, 1, 4, 3));
        assert!(!is_comeback(2, 2, 3, 2));
        assert!(!is_comeback(1, 3, 3, 3));
    }
}
