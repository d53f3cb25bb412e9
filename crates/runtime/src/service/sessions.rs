//! Session operations: start, poll, collect, cancel.
//!
//! Poll, collect and cancel share one settle transaction that refreshes the
//! bound node, composes rates at `now`, advances the session and stages the
//! session, node, tool and skill writes together.

use gathering_core::{
    CharacterId, ComposedRates, DurabilityChange, GatheringNode, GatheringSession, LevelChange,
    MaterialId, NodeId, RefreshOutcome, SessionError, SettleOutcome, SkillRecord, StartRequest,
    Timestamp, ValidationError,
};
use tracing::{debug, error, info, warn};

use super::GatheringService;
use crate::api::{CancelReport, CollectReport, ProgressReport, Result, StartReport};
use crate::events::{NodeEvent, ProgressionEvent, SessionEvent};
use crate::repository::{ChangeSet, Versioned};

/// Everything one settle produced, staged but not yet committed.
struct Settled {
    session: GatheringSession,
    session_version: u64,
    rates: ComposedRates,
    outcome: SettleOutcome,
    node: Option<StagedNode>,
    tool_wear: Option<DurabilityChange>,
    level_change: Option<LevelChange>,
    changes: ChangeSet,
}

struct StagedNode {
    node: GatheringNode,
    refresh: RefreshOutcome,
}

/// What happens to the session record when the settle commits.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SessionWrite {
    Keep,
    Delete,
}

impl GatheringService {
    /// Opens a gathering session for `character`.
    ///
    /// Failures are reported in this order: goal, material, node lookup,
    /// node material, node depletion, level requirements, running session.
    pub fn start_session(
        &self,
        character: CharacterId,
        material: &MaterialId,
        goal: u32,
        node: Option<NodeId>,
    ) -> Result<StartReport> {
        let now = self.clock.now();

        if goal < 1 {
            return Err(ValidationError::InvalidGoal { goal }.into());
        }
        let material = self.material(material)?;

        let mut changes = ChangeSet::new();
        let mut refreshed = None;
        let node = match node {
            Some(id) => {
                let Versioned { mut value, version } = self.node(id)?;
                let refresh = value.refresh(now);
                if refresh.changed() {
                    changes.put_node(value.clone(), Some(version));
                    refreshed = Some(refresh);
                }
                Some(value)
            }
            None => None,
        };

        let tools = self.loadout(character)?;
        let (discipline_level, _) = self.discipline_level(character, material.discipline)?;
        let character_level = self.characters.character_level(character)?;

        let session = GatheringSession::start(
            StartRequest {
                character,
                material: &material,
                node: node.as_ref(),
                goal,
                discipline_level,
                character_level,
            },
            now,
        )?;

        if self.store.session(character)?.is_some() {
            // The running session is credited up to `now` before refusing.
            let settled = self.settle(character, now)?;
            self.commit_settled("start_session", settled, SessionWrite::Keep)?;
            return Err(SessionError::AlreadyRunning { character }.into());
        }

        let selection = self.store.specialization(character, material.discipline)?;
        let rates = self.compose(
            &material,
            &tools.value,
            selection.as_ref().map(|selection| &selection.value),
            node.as_ref(),
            now,
        );

        changes.put_session(session.clone(), None);
        self.commit("start_session", changes)?;

        if let (Some(node), Some(refresh)) = (node.as_ref(), refreshed) {
            self.publish_refresh(node, refresh);
        }
        info!(
            %character,
            material = %session.material,
            goal,
            node = ?session.node,
            duration_ms = rates.duration_ms,
            "gathering session started"
        );
        self.events.publish(SessionEvent::Started {
            character,
            material: session.material.clone(),
            node: session.node,
            goal,
            at: now,
        });

        Ok(StartReport { session, rates })
    }

    /// Settles the session up to now and reports its progress.
    pub fn poll_session(&self, character: CharacterId) -> Result<ProgressReport> {
        let now = self.clock.now();
        let settled = self.settle(character, now)?;
        let settled = self.commit_settled("poll_session", settled, SessionWrite::Keep)?;

        let session = &settled.session;
        Ok(ProgressReport {
            character,
            material: session.material.clone(),
            discipline: session.discipline,
            node: session.node,
            completed: session.completed(),
            goal: session.goal,
            banked: session.banked(),
            status: session.status(),
            time_to_next_unit_ms: session.time_to_next_unit(settled.rates.duration_ms, now),
            gained: settled.outcome.gained,
            experience_gained: settled.outcome.experience,
            forfeited_ms: settled.outcome.forfeited_ms,
            level_up: settled.level_change.filter(LevelChange::leveled_up),
            tool_wear: settled.tool_wear,
            rates: settled.rates,
        })
    }

    /// Settles, then removes a completed session and grants its materials.
    ///
    /// Writes nothing when the session is still short of its goal.
    pub fn collect_session(&self, character: CharacterId) -> Result<CollectReport> {
        let now = self.clock.now();
        let settled = self.settle(character, now)?;
        if !settled.session.is_complete() {
            return Err(SessionError::NotComplete {
                completed: settled.session.completed(),
                goal: settled.session.goal,
            }
            .into());
        }

        let settled = self.commit_settled("collect_session", settled, SessionWrite::Delete)?;
        let quantity = settled.session.banked();
        self.grant_or_reopen("collect_session", &settled.session, quantity)?;
        let session = settled.session;

        info!(
            %character,
            material = %session.material,
            quantity,
            "gathering session collected"
        );
        self.events.publish(SessionEvent::Collected {
            character,
            material: session.material.clone(),
            quantity,
        });

        Ok(CollectReport {
            character,
            material: session.material,
            discipline: session.discipline,
            quantity,
            experience_gained: settled.outcome.experience,
            level_up: settled.level_change.filter(LevelChange::leveled_up),
        })
    }

    /// Settles, grants whatever was banked so far and ends the session.
    pub fn cancel_session(&self, character: CharacterId) -> Result<CancelReport> {
        let now = self.clock.now();
        let settled = self.settle(character, now)?;
        let settled = self.commit_settled("cancel_session", settled, SessionWrite::Delete)?;
        let granted = settled.session.banked();
        self.grant_or_reopen("cancel_session", &settled.session, granted)?;

        let session = settled.session;
        let completed = session.completed();
        let goal = session.goal;

        info!(
            %character,
            material = %session.material,
            completed,
            goal,
            granted,
            "gathering session cancelled"
        );
        self.events.publish(SessionEvent::Cancelled {
            character,
            material: session.material.clone(),
            completed,
            granted,
        });

        Ok(CancelReport {
            character,
            material: session.material,
            discipline: session.discipline,
            completed,
            goal,
            granted,
            experience_gained: settled.outcome.experience,
            level_up: settled.level_change.filter(LevelChange::leveled_up),
        })
    }

    /// Reads everything the session depends on and advances it to `now`.
    fn settle(&self, character: CharacterId, now: Timestamp) -> Result<Settled> {
        let Versioned {
            value: mut session,
            version: session_version,
        } = self
            .store
            .session(character)?
            .ok_or(SessionError::NotFound { character })?;

        let material = self.material(&session.material)?;
        let tools = self.loadout(character)?;
        let selection = self.store.specialization(character, session.discipline)?;

        let mut waited_ms = 0;
        let mut node = match session.node {
            Some(id) => {
                let Versioned { mut value, version } = self.node(id)?;
                let refresh = value.refresh(now);
                // Time before the node's last respawn is not gathering time,
                // whichever caller performed the respawn.
                if let Some(respawned_at) = value.last_respawned_at() {
                    waited_ms = session.forfeit_until(respawned_at);
                }
                Some((value, version, refresh))
            }
            None => None,
        };

        let rates = self.compose(
            &material,
            &tools.value,
            selection.as_ref().map(|selection| &selection.value),
            node.as_ref().map(|(node, _, _)| node),
            now,
        );
        let mut outcome = session.settle(
            &rates,
            node.as_mut().map(|(node, _, _)| node),
            self.env().rng,
            now,
        )?;
        outcome.forfeited_ms += waited_ms;
        debug!(
            %character,
            gained = outcome.gained,
            successes = outcome.successes,
            banked = outcome.banked,
            forfeited_ms = outcome.forfeited_ms,
            duration_ms = rates.duration_ms,
            "settled gathering session"
        );

        let mut changes = ChangeSet::new();
        let mut staged_node = None;
        if let Some((node, version, refresh)) = node {
            if refresh.changed() || outcome.harvested > 0 {
                changes.put_node(node.clone(), Some(version));
            }
            staged_node = Some(StagedNode { node, refresh });
        }

        let mut tool_wear = None;
        if outcome.gained > 0 {
            let Versioned {
                value: mut loadout,
                version,
            } = tools;
            tool_wear = loadout.wear(
                session.discipline,
                outcome.gained,
                rates.durability_loss_factor,
                self.env().config,
            );
            if tool_wear.is_some() {
                changes.put_tools(loadout, Some(version));
            }
        }

        let mut level_change = None;
        if outcome.experience > 0 {
            let (_, record) = self.discipline_level(character, session.discipline)?;
            let (mut skill, expected) = match record {
                Some(Versioned { value, version }) => (value, Some(version)),
                None => (SkillRecord::new(character, session.discipline), None),
            };
            level_change = Some(skill.add_experience(outcome.experience, self.env().config));
            changes.put_skill(skill, expected);
        }

        Ok(Settled {
            session,
            session_version,
            rates,
            outcome,
            node: staged_node,
            tool_wear,
            level_change,
            changes,
        })
    }

    /// Commits a settle and publishes what it changed.
    fn commit_settled(
        &self,
        operation: &'static str,
        mut settled: Settled,
        write: SessionWrite,
    ) -> Result<Settled> {
        let character = settled.session.character;
        match write {
            SessionWrite::Delete => {
                settled
                    .changes
                    .delete_session(character, settled.session_version);
            }
            SessionWrite::Keep if settled.outcome.changed() => {
                settled
                    .changes
                    .put_session(settled.session.clone(), Some(settled.session_version));
            }
            SessionWrite::Keep => {}
        }

        let changes = std::mem::take(&mut settled.changes);
        self.commit(operation, changes)?;
        self.publish_settled(&settled);
        Ok(settled)
    }

    fn publish_settled(&self, settled: &Settled) {
        let session = &settled.session;
        let character = session.character;
        let outcome = &settled.outcome;

        if let Some(staged) = &settled.node {
            self.publish_refresh(&staged.node, staged.refresh);
            if outcome.harvested > 0 {
                self.events.publish(NodeEvent::Harvested {
                    node: staged.node.id,
                    remaining: staged.node.durability(),
                });
            }
        }
        if let Some((node, respawn_at)) = outcome.node_depleted {
            info!(%node, %respawn_at, "node depleted by gathering session");
            self.events.publish(NodeEvent::Depleted { node, respawn_at });
        }
        if outcome.forfeited_ms > 0 {
            warn!(
                %character,
                forfeited_ms = outcome.forfeited_ms,
                "node ran out; waiting time forfeited"
            );
        }

        if outcome.gained > 0 {
            self.events.publish(SessionEvent::Progressed {
                character,
                gained: outcome.gained,
                completed: session.completed(),
                goal: session.goal,
                experience: outcome.experience,
            });
        }
        if outcome.completed {
            info!(%character, material = %session.material, goal = session.goal, "gathering session completed");
            self.events.publish(SessionEvent::Completed {
                character,
                material: session.material.clone(),
                at: session.last_settled_at(),
            });
        }

        if let Some(change) = settled.tool_wear
            && change.broke()
        {
            warn!(%character, slot = %change.slot, "tool broke while gathering");
            self.events.publish(ProgressionEvent::ToolBroken {
                character,
                slot: change.slot,
            });
        }
        if let Some(change) = settled.level_change {
            self.publish_level_change(character, change);
        }
    }

    /// Hands banked materials to the inventory after the session delete
    /// committed. When the inventory refuses, the settled session is put back
    /// so the caller can retry without losing what was banked.
    fn grant_or_reopen(
        &self,
        operation: &'static str,
        session: &GatheringSession,
        quantity: u32,
    ) -> Result<()> {
        if quantity == 0 {
            return Ok(());
        }
        let character = session.character;
        let Err(error) = self
            .inventory
            .add_material(character, &session.material, quantity)
        else {
            return Ok(());
        };

        warn!(
            operation,
            %character,
            material = %session.material,
            quantity,
            %error,
            "inventory grant failed; reopening session"
        );
        let mut changes = ChangeSet::new();
        changes.put_session(session.clone(), None);
        if let Err(reopen) = self.commit(operation, changes) {
            error!(
                operation,
                %character,
                material = %session.material,
                quantity,
                error = %reopen,
                "could not reopen session after failed grant"
            );
        }
        Err(error.into())
    }
}
