//! The address-acquisition state machine.
//!
//! Collects a postal address across independent conversational turns:
//! either three structured fields (house number, street name, zipcode)
//! or one free-form utterance, never mixed within one attempt. An
//! existing stored address gates the flow behind an explicit overwrite
//! confirmation. Out-of-order input leaves the state unchanged and
//! yields a corrective prompt.

/// How an acquisition attempt collects the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Three-step slot filling: house number, street name, zipcode.
    Structured,
    /// One free-form address utterance, geocoded in a single shot.
    Freeform,
}

/// Where the dialogue currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No acquisition in progress.
    Idle,
    /// Waiting for the user to confirm replacing their stored address.
    AwaitingOverwriteConfirm,
    AwaitingHouseNumber,
    AwaitingStreetName,
    AwaitingZipcode,
    /// All fields collected; a geocoding attempt is in flight. The
    /// driver must report the outcome via the `resolution_*` methods.
    Resolving,
}

/// One conversational event, already normalized by the turn handler.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionEvent {
    /// The user asked to add (or replace) their address. Carries the
    /// full address text when the freeform strategy is in use.
    Start { freeform: Option<String> },
    HouseNumber(String),
    StreetName(String),
    Zipcode(String),
    OverwriteConfirmed,
    OverwriteDeclined,
}

/// Which prompt the handler should speak. Texts live in `prompts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Ask whether to overwrite the stored address.
    ConfirmOverwrite,
    /// Ask for the next expected field.
    AskHouseNumber,
    AskStreetName,
    AskZipcode,
    /// Corrective: a street name arrived before a house number.
    MissingHouseNumber,
    /// Corrective: a zipcode arrived before a street name.
    MissingStreetName,
    /// Corrective: a slot value arrived with no acquisition running.
    NotAcquiring,
    /// Corrective: a confirm/decline arrived with nothing pending.
    NoConfirmationPending,
    /// The start event promised a freeform address but carried none.
    AskFullAddress,
}

/// What the driver should do after feeding an event in.
#[derive(Debug, Clone, PartialEq)]
pub enum StepEffect {
    /// Speak a prompt and keep the session open.
    Prompt(PromptKind),
    /// Every required field is present: geocode this query.
    Resolve { query: String },
    /// The user declined the overwrite; the stored address stays.
    KeptExisting,
}

/// Per-session acquisition state. Discarded when the session ends;
/// never persisted independently of a finalized address.
#[derive(Debug, Clone, Default)]
pub struct AcquisitionState {
    phase: Option<Phase>,
    house_number: Option<String>,
    street_name: Option<String>,
    zipcode: Option<String>,
    /// Address text supplied alongside a start event that got parked
    /// behind the overwrite confirmation.
    stashed_freeform: Option<String>,
    /// Set once the user confirms an overwrite, so retries within the
    /// same attempt are not re-gated.
    overwrite_confirmed: bool,
}

impl AcquisitionState {
    /// A fresh, idle machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase.unwrap_or(Phase::Idle)
    }

    /// The collected house number, if the attempt was structured.
    pub fn house_number(&self) -> Option<&String> {
        self.house_number.as_ref()
    }

    /// The collected street name, if the attempt was structured.
    pub fn street_name(&self) -> Option<&String> {
        self.street_name.as_ref()
    }

    /// The collected zipcode, if the attempt was structured.
    pub fn zipcode(&self) -> Option<&String> {
        self.zipcode.as_ref()
    }

    /// Feed one event in. `has_stored_address` tells the machine
    /// whether the user already has a non-empty persisted address.
    pub fn step(&mut self, event: AcquisitionEvent, has_stored_address: bool) -> StepEffect {
        match event {
            AcquisitionEvent::Start { freeform } => self.on_start(freeform, has_stored_address),
            AcquisitionEvent::HouseNumber(n) => self.on_house_number(n),
            AcquisitionEvent::StreetName(s) => self.on_street_name(s),
            AcquisitionEvent::Zipcode(z) => self.on_zipcode(z),
            AcquisitionEvent::OverwriteConfirmed => self.on_overwrite_confirmed(),
            AcquisitionEvent::OverwriteDeclined => self.on_overwrite_declined(),
        }
    }

    fn on_start(&mut self, freeform: Option<String>, has_stored_address: bool) -> StepEffect {
        // A non-empty stored address requires explicit confirmation
        // before any field is accepted, unless it was already given.
        if has_stored_address && !self.overwrite_confirmed {
            self.stashed_freeform = freeform;
            self.set_phase(Phase::AwaitingOverwriteConfirm);
            return StepEffect::Prompt(PromptKind::ConfirmOverwrite);
        }

        self.begin_attempt(freeform)
    }

    fn on_house_number(&mut self, n: String) -> StepEffect {
        match self.phase() {
            Phase::AwaitingHouseNumber => {
                self.house_number = Some(n);
                self.set_phase(Phase::AwaitingStreetName);
                StepEffect::Prompt(PromptKind::AskStreetName)
            }
            Phase::AwaitingOverwriteConfirm => StepEffect::Prompt(PromptKind::ConfirmOverwrite),
            // Re-prompt for what the flow actually expects next.
            Phase::AwaitingStreetName => StepEffect::Prompt(PromptKind::AskStreetName),
            Phase::AwaitingZipcode => StepEffect::Prompt(PromptKind::AskZipcode),
            Phase::Idle | Phase::Resolving => StepEffect::Prompt(PromptKind::NotAcquiring),
        }
    }

    fn on_street_name(&mut self, s: String) -> StepEffect {
        match self.phase() {
            Phase::AwaitingStreetName => {
                self.street_name = Some(s);
                self.set_phase(Phase::AwaitingZipcode);
                StepEffect::Prompt(PromptKind::AskZipcode)
            }
            Phase::AwaitingOverwriteConfirm => StepEffect::Prompt(PromptKind::ConfirmOverwrite),
            // A street name before a house number is recoverable user
            // error, not a transition.
            Phase::AwaitingHouseNumber => StepEffect::Prompt(PromptKind::MissingHouseNumber),
            Phase::AwaitingZipcode => StepEffect::Prompt(PromptKind::AskZipcode),
            Phase::Idle | Phase::Resolving => StepEffect::Prompt(PromptKind::NotAcquiring),
        }
    }

    fn on_zipcode(&mut self, z: String) -> StepEffect {
        match self.phase() {
            Phase::AwaitingZipcode => {
                // Guaranteed by the phase transitions.
                let house = self.house_number.clone().unwrap_or_default();
                let street = self.street_name.clone().unwrap_or_default();
                self.zipcode = Some(z.clone());
                self.set_phase(Phase::Resolving);
                StepEffect::Resolve {
                    query: format!("{house} {street}, {z}"),
                }
            }
            Phase::AwaitingOverwriteConfirm => StepEffect::Prompt(PromptKind::ConfirmOverwrite),
            // Distinguish which prerequisite is missing.
            Phase::AwaitingHouseNumber => StepEffect::Prompt(PromptKind::MissingHouseNumber),
            Phase::AwaitingStreetName => StepEffect::Prompt(PromptKind::MissingStreetName),
            Phase::Idle | Phase::Resolving => StepEffect::Prompt(PromptKind::NotAcquiring),
        }
    }

    fn on_overwrite_confirmed(&mut self) -> StepEffect {
        if self.phase() != Phase::AwaitingOverwriteConfirm {
            return StepEffect::Prompt(PromptKind::NoConfirmationPending);
        }

        self.overwrite_confirmed = true;
        let stash = self.stashed_freeform.take();
        self.begin_attempt(stash)
    }

    fn on_overwrite_declined(&mut self) -> StepEffect {
        if self.phase() != Phase::AwaitingOverwriteConfirm {
            return StepEffect::Prompt(PromptKind::NoConfirmationPending);
        }

        self.reset();
        StepEffect::KeptExisting
    }

    /// Start a fresh attempt. A supplied freeform address means a
    /// single-shot geocode; otherwise structured collection begins.
    fn begin_attempt(&mut self, freeform: Option<String>) -> StepEffect {
        self.clear_fields();

        match freeform {
            Some(query) if !query.trim().is_empty() => {
                self.set_phase(Phase::Resolving);
                StepEffect::Resolve { query }
            }
            Some(_) => {
                // Freeform strategy chosen but the utterance carried
                // no usable address text.
                self.set_phase(Phase::Idle);
                StepEffect::Prompt(PromptKind::AskFullAddress)
            }
            None => {
                self.set_phase(Phase::AwaitingHouseNumber);
                StepEffect::Prompt(PromptKind::AskHouseNumber)
            }
        }
    }

    /// The geocoded address passed validation and was persisted. The
    /// attempt is complete and the machine goes back to idle.
    pub fn resolution_succeeded(&mut self) {
        self.reset();
    }

    /// Geocoding found no match (or the result was malformed).
    /// Recoverable: partial fields are cleared and collection restarts
    /// at the house number. The overwrite confirmation, once given,
    /// still covers the retry.
    pub fn resolution_failed_retry(&mut self) -> PromptKind {
        self.clear_fields();
        self.set_phase(Phase::AwaitingHouseNumber);
        PromptKind::AskHouseNumber
    }

    /// The resolved locale is outside the supported regions. Terminal
    /// for this attempt; the stored address is untouched.
    pub fn resolution_rejected(&mut self) {
        self.reset();
    }

    /// The attempt was abandoned because of an infrastructure failure
    /// (feed or persistence). Nothing was saved.
    pub fn resolution_aborted(&mut self) {
        self.reset();
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = Some(phase);
    }

    fn clear_fields(&mut self) {
        self.house_number = None;
        self.street_name = None;
        self.zipcode = None;
        self.stashed_freeform = None;
    }

    fn reset(&mut self) {
        self.clear_fields();
        self.overwrite_confirmed = false;
        self.phase = Some(Phase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> AcquisitionEvent {
        AcquisitionEvent::Start { freeform: None }
    }

    fn start_with(text: &str) -> AcquisitionEvent {
        AcquisitionEvent::Start {
            freeform: Some(text.to_string()),
        }
    }

    #[test]
    fn structured_walk_produces_geocode_query() {
        let mut machine = AcquisitionState::new();

        assert_eq!(
            machine.step(start(), false),
            StepEffect::Prompt(PromptKind::AskHouseNumber)
        );
        assert_eq!(
            machine.step(AcquisitionEvent::HouseNumber("350".into()), false),
            StepEffect::Prompt(PromptKind::AskStreetName)
        );
        assert_eq!(
            machine.step(AcquisitionEvent::StreetName("5th Avenue".into()), false),
            StepEffect::Prompt(PromptKind::AskZipcode)
        );
        assert_eq!(
            machine.step(AcquisitionEvent::Zipcode("10118".into()), false),
            StepEffect::Resolve {
                query: "350 5th Avenue, 10118".to_string()
            }
        );
        assert_eq!(machine.phase(), Phase::Resolving);
    }

    #[test]
    fn freeform_single_shot_resolves_immediately() {
        let mut machine = AcquisitionState::new();

        assert_eq!(
            machine.step(start_with("1234 Broadway, 10001"), false),
            StepEffect::Resolve {
                query: "1234 Broadway, 10001".to_string()
            }
        );
        assert_eq!(machine.phase(), Phase::Resolving);
    }

    #[test]
    fn freeform_with_blank_text_reprompts() {
        let mut machine = AcquisitionState::new();

        assert_eq!(
            machine.step(start_with("   "), false),
            StepEffect::Prompt(PromptKind::AskFullAddress)
        );
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn street_name_while_idle_does_not_advance() {
        let mut machine = AcquisitionState::new();

        let effect = machine.step(AcquisitionEvent::StreetName("Broadway".into()), false);
        assert_eq!(effect, StepEffect::Prompt(PromptKind::NotAcquiring));
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn street_name_before_house_number_is_corrective() {
        let mut machine = AcquisitionState::new();
        machine.step(start(), false);

        let effect = machine.step(AcquisitionEvent::StreetName("Broadway".into()), false);
        assert_eq!(effect, StepEffect::Prompt(PromptKind::MissingHouseNumber));
        // State unchanged: still waiting for the house number.
        assert_eq!(machine.phase(), Phase::AwaitingHouseNumber);
    }

    #[test]
    fn zipcode_correctives_distinguish_missing_field() {
        let mut machine = AcquisitionState::new();
        machine.step(start(), false);

        // No house number yet.
        assert_eq!(
            machine.step(AcquisitionEvent::Zipcode("10001".into()), false),
            StepEffect::Prompt(PromptKind::MissingHouseNumber)
        );

        machine.step(AcquisitionEvent::HouseNumber("1".into()), false);

        // House number present, street name missing.
        assert_eq!(
            machine.step(AcquisitionEvent::Zipcode("10001".into()), false),
            StepEffect::Prompt(PromptKind::MissingStreetName)
        );
        assert_eq!(machine.phase(), Phase::AwaitingStreetName);
    }

    #[test]
    fn stored_address_gates_on_overwrite_confirmation() {
        let mut machine = AcquisitionState::new();

        let effect = machine.step(start_with("1 Main St, 11201"), true);
        assert_eq!(effect, StepEffect::Prompt(PromptKind::ConfirmOverwrite));
        assert_eq!(machine.phase(), Phase::AwaitingOverwriteConfirm);

        // No field is accepted while confirmation is pending.
        assert_eq!(
            machine.step(AcquisitionEvent::HouseNumber("1".into()), true),
            StepEffect::Prompt(PromptKind::ConfirmOverwrite)
        );
        assert_eq!(machine.phase(), Phase::AwaitingOverwriteConfirm);
    }

    #[test]
    fn overwrite_confirmed_carries_stashed_candidate() {
        let mut machine = AcquisitionState::new();
        machine.step(start_with("1 Main St, 11201"), true);

        let effect = machine.step(AcquisitionEvent::OverwriteConfirmed, true);
        assert_eq!(
            effect,
            StepEffect::Resolve {
                query: "1 Main St, 11201".to_string()
            }
        );
    }

    #[test]
    fn overwrite_confirmed_without_stash_restarts_collection() {
        let mut machine = AcquisitionState::new();
        machine.step(start(), true);

        let effect = machine.step(AcquisitionEvent::OverwriteConfirmed, true);
        assert_eq!(effect, StepEffect::Prompt(PromptKind::AskHouseNumber));
        assert_eq!(machine.phase(), Phase::AwaitingHouseNumber);
    }

    #[test]
    fn overwrite_declined_keeps_existing_and_discards_stash() {
        let mut machine = AcquisitionState::new();
        machine.step(start_with("1 Main St, 11201"), true);

        let effect = machine.step(AcquisitionEvent::OverwriteDeclined, true);
        assert_eq!(effect, StepEffect::KeptExisting);
        assert_eq!(machine.phase(), Phase::Idle);

        // A later confirm answers no pending question.
        assert_eq!(
            machine.step(AcquisitionEvent::OverwriteConfirmed, true),
            StepEffect::Prompt(PromptKind::NoConfirmationPending)
        );
    }

    #[test]
    fn confirm_without_pending_question_is_corrective() {
        let mut machine = AcquisitionState::new();

        assert_eq!(
            machine.step(AcquisitionEvent::OverwriteConfirmed, false),
            StepEffect::Prompt(PromptKind::NoConfirmationPending)
        );
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn geocode_retry_restarts_at_house_number_without_regating() {
        let mut machine = AcquisitionState::new();
        machine.step(start(), true);
        machine.step(AcquisitionEvent::OverwriteConfirmed, true);
        machine.step(AcquisitionEvent::HouseNumber("999999".into()), true);
        machine.step(AcquisitionEvent::StreetName("Nowhere".into()), true);
        machine.step(AcquisitionEvent::Zipcode("00000".into()), true);
        assert_eq!(machine.phase(), Phase::Resolving);

        let prompt = machine.resolution_failed_retry();
        assert_eq!(prompt, PromptKind::AskHouseNumber);
        assert_eq!(machine.phase(), Phase::AwaitingHouseNumber);

        // The confirmation already given covers the retry: restarting
        // does not demand another overwrite confirmation.
        assert_eq!(
            machine.step(AcquisitionEvent::HouseNumber("350".into()), true),
            StepEffect::Prompt(PromptKind::AskStreetName)
        );
    }

    #[test]
    fn success_and_rejection_reset_to_idle() {
        let mut machine = AcquisitionState::new();
        machine.step(start_with("350 5th Ave, 10118"), false);
        machine.resolution_succeeded();
        assert_eq!(machine.phase(), Phase::Idle);

        machine.step(start_with("9 Elsewhere Rd, 99999"), false);
        machine.resolution_rejected();
        assert_eq!(machine.phase(), Phase::Idle);

        // After a terminal rejection the overwrite gate applies afresh.
        assert_eq!(
            machine.step(start(), true),
            StepEffect::Prompt(PromptKind::ConfirmOverwrite)
        );
    }
}
