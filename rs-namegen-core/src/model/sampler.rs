use rand::Rng;

/// Frequency-weighted distribution over characters.
///
/// A `WeightedCharSampler` is attached to one context of a Markov model and
/// records every character observed right after that context.
///
/// Duplicates are kept on purpose: a character seen three times is stored
/// three times, so a uniform draw over the members is already weighted by
/// observed frequency. No explicit counts are tracked.
///
/// ## Invariants
/// - Members are stored lower-cased
/// - Members are only ever appended
/// - An empty sampler is a valid terminal state, not an error
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedCharSampler {
	/// Observed successors, one entry per observation.
	/// Example: ['e', 'e', 'a'] draws 'e' two times out of three.
	members: Vec<char>,
}

impl WeightedCharSampler {
	/// Creates an empty sampler.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one observation of `member`.
	///
	/// The character is lower-cased before being stored. When lower-casing
	/// expands to several characters, only the first one is kept.
	pub fn add_member(&mut self, member: char) {
		let lower = member.to_lowercase().next().unwrap_or(member);
		self.members.push(lower);
	}

	/// Draws a member with probability proportional to its frequency.
	///
	/// Returns `None` if nothing was ever added. Callers treat `None` as
	/// "no successor", which ends a generated word.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
		if self.members.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.members.len());
		self.members.get(index).copied()
	}

	/// Number of recorded observations.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	/// Returns `true` when no member was ever added.
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Recorded observations, in insertion order.
	pub fn members(&self) -> &[char] {
		&self.members
	}
}
