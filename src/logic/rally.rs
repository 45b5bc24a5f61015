//! Rally reconstruction: split a time-ordered shot stream into closed rallies.

use crate::models::{MatchId, PlayerId, Rally, RallyId, ShotEvent};

/// Fold state: the rally being built (if any) and the rallies closed so far.
struct Scan<'a> {
    open: Option<Vec<&'a ShotEvent>>,
    closed: Vec<Rally>,
    subject: Option<PlayerId>,
}

impl<'a> Scan<'a> {
    fn new(subject: Option<PlayerId>) -> Self {
        Self {
            open: None,
            closed: Vec::new(),
            subject,
        }
    }

    fn step(mut self, shot: &'a ShotEvent) -> Self {
        if shot.shot_type.is_serve() {
            // A serve while a rally is open: the open one never ended, so it is incomplete.
            if let Some(dropped) = self.open.take() {
                log::debug!(
                    "dropping {} shot(s) of unterminated rally before serve {}",
                    dropped.len(),
                    shot.id
                );
            }
            self.open = Some(vec![shot]);
        } else if let Some(open) = self.open.as_mut() {
            open.push(shot);
        } else {
            log::debug!(
                "shot {} ({:?}) opens a rally without a serve",
                shot.id,
                shot.shot_type
            );
            self.open = Some(vec![shot]);
        }

        if shot.result.is_terminal() {
            self.close();
        }
        self
    }

    fn close(&mut self) {
        let Some(shots) = self.open.take() else {
            return;
        };
        let id = self.closed.len() as RallyId + 1;
        let shots = shots.into_iter().cloned().collect();
        if let Some(rally) = Rally::from_shots(id, shots, self.subject) {
            self.closed.push(rally);
        }
    }

    fn finish(self) -> Vec<Rally> {
        if let Some(dangling) = &self.open {
            log::debug!(
                "discarding {} trailing shot(s) with no point/miss",
                dangling.len()
            );
        }
        self.closed
    }
}

/// Reconstruct closed rallies from shots in nondecreasing timestamp order.
///
/// - `match_id`: only shots of this match are considered; `None` treats the whole
///   input as one stream.
/// - `subject`: player whose wins set `Rally::is_win`.
///
/// A serve opens a rally; a `point` or `miss` closes it. Shots that never reach a
/// closing shot (interrupted by a serve, or at the end of the stream) are dropped.
/// Input is not re-sorted.
pub fn reconstruct_rallies(
    shots: &[ShotEvent],
    match_id: Option<MatchId>,
    subject: Option<PlayerId>,
) -> Vec<Rally> {
    shots
        .iter()
        .filter(|s| match_id.map_or(true, |id| s.match_id == id))
        .fold(Scan::new(subject), Scan::step)
        .finish()
}
