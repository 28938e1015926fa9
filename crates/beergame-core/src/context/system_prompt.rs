use crate::game::{Mode, PlayerRole};

/// Builds the system prompt for the Beer Game coach.
/// Assembled from the game rules, the player's role and the coaching mode.
pub struct SystemPromptBuilder {
    mode: Mode,
    role: PlayerRole,
    turn_directive: bool,
}

impl SystemPromptBuilder {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            role: PlayerRole::default(),
            turn_directive: false,
        }
    }

    pub fn with_role(mut self, role: PlayerRole) -> Self {
        self.role = role;
        self
    }

    /// Free-form role text from the host; unknown values become `Retailer`.
    pub fn with_role_name(mut self, role: &str) -> Self {
        self.role = PlayerRole::normalize(role);
        self
    }

    /// Append a closing instruction to tailor this turn's answer to the role.
    pub fn with_turn_directive(mut self) -> Self {
        self.turn_directive = true;
        self
    }

    pub fn build(&self) -> String {
        let mut blocks = vec![
            BASE_GAME_RULES.to_string(),
            role_block(self.role),
            mode_block(self.mode).to_string(),
        ];

        if self.turn_directive {
            blocks.push(turn_directive(self.role));
        }

        let prompt = blocks.join("\n\n");
        tracing::debug!(
            mode = %self.mode,
            role = %self.role,
            chars = prompt.len(),
            "Built system prompt"
        );
        prompt
    }
}

/// Build the coach's system prompt for a mode and free-form role text.
pub fn build_prompt(mode: Mode, role: &str) -> String {
    SystemPromptBuilder::new(mode).with_role_name(role).build()
}

pub const BASE_GAME_RULES: &str = "\
You are a supply chain agent helping me play a role-playing game.
The game has four players: retailer / wholesaler / distributor / factory.
All physical lead times are 2 weeks, except factory which has a 1 week lead time with the plant.
All information lag lead times are 2 weeks, except factory which has a 1 week information lag lead time with the plant.
The holding cost is $0.5 per case per week and the backorder cost is $1 per case per week.
There is a steady demand of 4 cases each week, so the pipeline is fully loaded with 4 cases at every stage.
The starting inventory position is 12 cases.
Each week the user will give you the downstream customer's demand.
You will tell the user your recommended order quantity.
The user can override your recommendation.";

pub const QUALITATIVE_BLOCK: &str = "\
Mode: Qualitative Coach.
Focus on intuition, system dynamics, bullwhip effect, and decision rationale.
Be concise and classroom-friendly.";

pub const QUANTITATIVE_BLOCK: &str = "\
Mode: Quantitative Coach.
Show step-by-step calculations and clearly label inventory, pipeline, backorders, and costs.
Be concise and classroom-friendly.";

pub fn mode_block(mode: Mode) -> &'static str {
    match mode {
        Mode::Qualitative => QUALITATIVE_BLOCK,
        Mode::Quantitative => QUANTITATIVE_BLOCK,
    }
}

/// The sentence naming the demand signal for `role`.
pub fn demand_sentence(role: PlayerRole) -> String {
    format!(
        "As the {}, your demand signal is {}.",
        role.name(),
        role.demand_signal()
    )
}

pub fn role_block(role: PlayerRole) -> String {
    let mut block = format!(
        "The user is playing the role of the **{}**.\n\
         Always answer from the perspective of advising that role.\n\
         {}\n\
         Use the correct downstream demand signal for that role:",
        role.name(),
        demand_sentence(role)
    );
    for r in PlayerRole::ALL {
        block.push_str(&format!("\n- {}: {}", r.name(), r.demand_signal()));
        if r != PlayerRole::Retailer {
            block.push_str(" (as demand)");
        }
    }
    block
}

fn turn_directive(role: PlayerRole) -> String {
    format!(
        "For this reply, tailor your answer to the {} and base any order recommendation on {}.",
        role.name(),
        role.demand_signal()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_are_joined_with_blank_lines() {
        let prompt = build_prompt(Mode::Qualitative, "Retailer");
        let parts: Vec<&str> = prompt.split("\n\n").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], BASE_GAME_RULES);
        assert_eq!(parts[2], QUALITATIVE_BLOCK);
    }

    #[test]
    fn test_turn_directive_is_last_block() {
        let prompt = SystemPromptBuilder::new(Mode::Quantitative)
            .with_role(PlayerRole::Distributor)
            .with_turn_directive()
            .build();
        let last = prompt.rsplit("\n\n").next().unwrap();
        assert!(last.contains("tailor your answer to the Distributor"));
        assert!(last.contains("wholesaler orders"));
    }
}
