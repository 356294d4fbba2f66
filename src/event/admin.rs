//! Admin roster: team points, question progress and card holdings.

use std::fmt;

use log::debug;

use super::EventError;

#[rustfmt::skip]
pub const ALL_ALGO_CARDS: [&str; 7] = [
    "Quick Sort", "DFS", "Dynamic Programming", "Dijkstra", "Binary Search", "BFS", "Merge Sort",
];

#[rustfmt::skip]
pub const ALL_ACTION_CARDS: [&str; 8] = [
    "Shield", "Point Stealer", "Time Warp", "Double Up", "Storm", "Kraken", "Freeze Team",
    "Steal Points",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Algorithm,
    Action,
}

impl CardKind {
    /// Most cards of this kind a team may hold
    pub fn limit(self) -> usize {
        match self {
            CardKind::Algorithm => 3,
            CardKind::Action => 4,
        }
    }

    /// Every card of this kind the admin can hand out
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            CardKind::Algorithm => &ALL_ALGO_CARDS,
            CardKind::Action => &ALL_ACTION_CARDS,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardKind::Algorithm => write!(f, "Algorithm"),
            CardKind::Action => write!(f, "Action"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub points: i64,
    pub algo_cards: Vec<String>,
    pub action_cards: Vec<String>,
    /// Question the team is currently on (1-based)
    pub question: u32,
}

impl Team {
    fn new(id: u32, name: &str, points: i64, question: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            points,
            algo_cards: Vec::new(),
            action_cards: Vec::new(),
            question,
        }
    }

    fn with_cards(mut self, algo: &[&str], action: &[&str]) -> Self {
        self.algo_cards = algo.iter().map(|c| c.to_string()).collect();
        self.action_cards = action.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn cards(&self, kind: CardKind) -> &[String] {
        match kind {
            CardKind::Algorithm => &self.algo_cards,
            CardKind::Action => &self.action_cards,
        }
    }

    fn cards_mut(&mut self, kind: CardKind) -> &mut Vec<String> {
        match kind {
            CardKind::Algorithm => &mut self.algo_cards,
            CardKind::Action => &mut self.action_cards,
        }
    }
}

/// Leading integer of `input` after optional whitespace and sign, ignoring
/// trailing text ("12abc" is 12)
fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Debug, Clone, Default)]
pub struct TeamRoster {
    teams: Vec<Team>,
}

impl TeamRoster {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Demo roster
    pub fn mock() -> Self {
        Self::new(vec![
            Team::new(1, "Alpha Squad", 1200, 1).with_cards(&["Merge Sort"], &["Steal Points"]),
            Team::new(2, "Binary bandits", 950, 3).with_cards(&["Dijkstra"], &["Freeze Team"]),
            Team::new(3, "Cyber Knights", 800, 5).with_cards(&[], &["Double Points"]),
        ])
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: u32) -> Result<&Team, EventError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(EventError::UnknownTeam(id))
    }

    fn team_mut(&mut self, id: u32) -> Result<&mut Team, EventError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(EventError::UnknownTeam(id))
    }

    /// Add a signed amount typed into the points field
    ///
    /// Empty input leaves the team unchanged. Returns the new total.
    pub fn adjust_points(&mut self, id: u32, input: &str) -> Result<i64, EventError> {
        let team = self.team_mut(id)?;
        if input.is_empty() {
            return Ok(team.points);
        }
        let invalid = || EventError::InvalidPoints(input.to_string());
        let delta = parse_leading_int(input).ok_or_else(invalid)?;
        team.points = team.points.checked_add(delta).ok_or_else(invalid)?;
        debug!("Team {} points {:+} -> {}", team.name, delta, team.points);
        Ok(team.points)
    }

    /// Set the current question from text; unparsable or non-positive input means 1
    pub fn set_question(&mut self, id: u32, input: &str) -> Result<u32, EventError> {
        let team = self.team_mut(id)?;
        team.question = parse_leading_int(input)
            .filter(|&n| n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1);
        Ok(team.question)
    }

    /// Give or take a card; returns whether the team holds it afterwards
    pub fn toggle_card(
        &mut self,
        id: u32,
        kind: CardKind,
        card: &str,
    ) -> Result<bool, EventError> {
        let team = self.team_mut(id)?;
        let cards = team.cards_mut(kind);

        if let Some(pos) = cards.iter().position(|c| c == card) {
            cards.remove(pos);
            return Ok(false);
        }
        if cards.len() >= kind.limit() {
            return Err(EventError::CardLimit {
                kind,
                limit: kind.limit(),
            });
        }
        cards.push(card.to_string());
        Ok(true)
    }

    /// Teams by points, highest first; ties keep roster order
    pub fn leaderboard(&self) -> Vec<&Team> {
        let mut board: Vec<&Team> = self.teams.iter().collect();
        board.sort_by(|a, b| b.points.cmp(&a.points));
        board
    }

    /// 1-based leaderboard position
    pub fn rank(&self, id: u32) -> Result<usize, EventError> {
        self.leaderboard()
            .iter()
            .position(|t| t.id == id)
            .map(|i| i + 1)
            .ok_or(EventError::UnknownTeam(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_roster() {
        let roster = TeamRoster::mock();
        assert_eq!(roster.teams().len(), 3);
        let bandits = roster.team(2).unwrap();
        assert_eq!(bandits.name, "Binary bandits");
        assert_eq!(bandits.points, 950);
        assert_eq!(bandits.question, 3);
        assert_eq!(bandits.cards(CardKind::Algorithm), ["Dijkstra"]);
        assert!(roster.team(3).unwrap().algo_cards.is_empty());
    }

    #[test]
    fn test_adjust_points() {
        let mut roster = TeamRoster::mock();
        assert_eq!(roster.adjust_points(1, "-300"), Ok(900));
        assert_eq!(roster.adjust_points(1, "50"), Ok(950));
        assert_eq!(roster.adjust_points(1, ""), Ok(950));
        assert_eq!(roster.adjust_points(1, " 25pts"), Ok(975));
        assert_eq!(
            roster.adjust_points(1, "lots"),
            Err(EventError::InvalidPoints("lots".to_string()))
        );
        assert_eq!(roster.adjust_points(9, "10"), Err(EventError::UnknownTeam(9)));
        assert_eq!(roster.team(1).unwrap().points, 975);
    }

    #[test]
    fn test_adjust_points_out_of_range() {
        let mut roster = TeamRoster::mock();
        let max = i64::MAX.to_string();
        assert_eq!(
            roster.adjust_points(1, &max),
            Err(EventError::InvalidPoints(max.clone()))
        );
        assert_eq!(
            roster.adjust_points(1, "99999999999999999999"),
            Err(EventError::InvalidPoints("99999999999999999999".to_string()))
        );
        assert_eq!(roster.team(1).unwrap().points, 1200);

        // Large but representable totals are fine
        assert_eq!(roster.adjust_points(1, &(i64::MAX - 1200).to_string()), Ok(i64::MAX));
    }

    #[test]
    fn test_set_question_falls_back_to_one() {
        let mut roster = TeamRoster::mock();
        assert_eq!(roster.set_question(3, "7"), Ok(7));
        assert_eq!(roster.set_question(3, ""), Ok(1));
        assert_eq!(roster.set_question(3, "abc"), Ok(1));
        assert_eq!(roster.set_question(3, "0"), Ok(1));
        assert_eq!(roster.team(3).unwrap().question, 1);
    }

    #[test]
    fn test_toggle_card_limits() {
        let mut roster = TeamRoster::mock();
        // Alpha Squad already holds Merge Sort
        assert_eq!(roster.toggle_card(1, CardKind::Algorithm, "DFS"), Ok(true));
        assert_eq!(roster.toggle_card(1, CardKind::Algorithm, "BFS"), Ok(true));
        assert_eq!(
            roster.toggle_card(1, CardKind::Algorithm, "Quick Sort"),
            Err(EventError::CardLimit {
                kind: CardKind::Algorithm,
                limit: 3
            })
        );
        // Removing is always allowed
        assert_eq!(roster.toggle_card(1, CardKind::Algorithm, "DFS"), Ok(false));
        assert_eq!(
            roster.team(1).unwrap().algo_cards,
            vec!["Merge Sort".to_string(), "BFS".to_string()]
        );

        for card in ["Shield", "Storm", "Kraken"] {
            assert_eq!(roster.toggle_card(2, CardKind::Action, card), Ok(true));
        }
        assert!(roster.toggle_card(2, CardKind::Action, "Time Warp").is_err());
        assert_eq!(roster.team(2).unwrap().action_cards.len(), 4);
    }

    #[test]
    fn test_leaderboard_and_rank() {
        let mut roster = TeamRoster::mock();
        let names: Vec<&str> = roster.leaderboard().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Alpha Squad", "Binary bandits", "Cyber Knights"]);

        roster.adjust_points(3, "500").unwrap();
        assert_eq!(roster.rank(3), Ok(1));
        assert_eq!(roster.rank(1), Ok(2));

        // Ties keep roster order
        roster.adjust_points(2, "250").unwrap();
        assert_eq!(roster.rank(1), Ok(2));
        assert_eq!(roster.rank(2), Ok(3));
        assert_eq!(roster.rank(42), Err(EventError::UnknownTeam(42)));
    }

    #[test]
    fn test_catalogs() {
        assert_eq!(CardKind::Algorithm.catalog().len(), 7);
        assert!(CardKind::Action.catalog().contains(&"Steal Points"));
        assert_eq!(CardKind::Action.to_string(), "Action");
    }
}
