//! Lottery tickets built from independent draws.

use std::fmt;

use rand::RngExt;

use crate::LottoError;
use crate::sampler::sample;

/// Marker terminating every rendered ticket line.
pub const LINE_BREAK: &str = "<br>";

/// Shape of one draw: `count` distinct numbers from `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Numbers drawn per ticket.
    pub count: usize,
    /// Largest number in the field.
    pub max: u32,
}

impl FieldSpec {
    /// Create a field without validation.
    #[must_use]
    pub const fn new(count: usize, max: u32) -> Self {
        Self { count, max }
    }

    /// Check that the field can be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`LottoError::InvalidRange`] if `count > max`.
    pub fn validate(self) -> Result<Self, LottoError> {
        if u32::try_from(self.count).is_ok_and(|c| c <= self.max) {
            Ok(self)
        } else {
            Err(LottoError::InvalidRange {
                count: self.count,
                max: self.max,
            })
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.count, self.max)
    }
}

/// One lottery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Main numbers, in draw order.
    pub main: Vec<u32>,
    /// Bonus numbers, in draw order.
    pub bonus: Vec<u32>,
}

impl fmt::Display for Ticket {
    /// Formats as `1,2,3,4,5 : 6,7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.main)?;
        f.write_str(" : ")?;
        write_joined(f, &self.bonus)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, numbers: &[u32]) -> fmt::Result {
    for (i, n) in numbers.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{n}")?;
    }
    Ok(())
}

/// Ordered sequence of tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSet {
    tickets: Vec<Ticket>,
}

impl TicketSet {
    /// Number of tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether the set holds no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Iterate tickets in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.tickets.iter()
    }

    /// Render every ticket as `<main> : <bonus><br>`, concatenated.
    ///
    /// This is the exact byte format stored as the `lotto` page body; an empty
    /// set renders as an empty string.
    #[must_use]
    pub fn render(&self) -> String {
        self.tickets
            .iter()
            .map(|ticket| format!("{ticket}{LINE_BREAK}"))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TicketSet {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Ticket>> for TicketSet {
    fn from(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }
}

/// Builds ticket sets from a main field and a bonus field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSetGenerator {
    main: FieldSpec,
    bonus: FieldSpec,
}

impl Default for TicketSetGenerator {
    /// 5 of 50 main numbers, 2 of 10 bonus numbers.
    fn default() -> Self {
        Self {
            main: FieldSpec::new(5, 50),
            bonus: FieldSpec::new(2, 10),
        }
    }
}

impl TicketSetGenerator {
    /// Create a generator for the given fields.
    ///
    /// # Errors
    ///
    /// Returns [`LottoError::InvalidRange`] if either field asks for more numbers
    /// than its range holds.
    pub fn new(main: FieldSpec, bonus: FieldSpec) -> Result<Self, LottoError> {
        Ok(Self {
            main: main.validate()?,
            bonus: bonus.validate()?,
        })
    }

    /// Main field.
    #[must_use]
    pub fn main(&self) -> FieldSpec {
        self.main
    }

    /// Bonus field.
    #[must_use]
    pub fn bonus(&self) -> FieldSpec {
        self.bonus
    }

    /// Draw `ticket_count` independent tickets.
    ///
    /// Each ticket takes one main draw and one bonus draw; numbers may repeat
    /// across the two draws and across tickets.
    ///
    /// # Errors
    ///
    /// Returns [`LottoError::InvalidRange`] if a field can't be drawn.
    pub fn generate<R: RngExt>(
        &self,
        rng: &mut R,
        ticket_count: usize,
    ) -> Result<TicketSet, LottoError> {
        let mut tickets = Vec::with_capacity(ticket_count);
        for i in 0..ticket_count {
            let ticket = Ticket {
                main: sample(rng, self.main.count, self.main.max)?,
                bonus: sample(rng, self.bonus.count, self.bonus.max)?,
            };
            tracing::debug!(ticket = i + 1, of = ticket_count, %ticket, "Drew ticket");
            tickets.push(ticket);
        }
        Ok(TicketSet { tickets })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn distinct_in_range(numbers: &[u32], max: u32) -> bool {
        let mut sorted = numbers.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len() == numbers.len() && numbers.iter().all(|n| (1..=max).contains(n))
    }

    #[test]
    fn test_ticket_display() {
        let ticket = Ticket {
            main: vec![3, 17, 42, 8, 25],
            bonus: vec![9, 1],
        };

        assert_eq!(ticket.to_string(), "3,17,42,8,25 : 9,1");
    }

    #[test]
    fn test_render_concatenates_lines() {
        let set = TicketSet::from(vec![
            Ticket {
                main: vec![1, 2, 3, 4, 5],
                bonus: vec![6, 7],
            },
            Ticket {
                main: vec![10, 20, 30, 40, 50],
                bonus: vec![1, 2],
            },
        ]);

        assert_eq!(
            set.render(),
            "1,2,3,4,5 : 6,7<br>10,20,30,40,50 : 1,2<br>"
        );
    }

    #[test]
    fn test_generate_zero_tickets() {
        let set = TicketSetGenerator::default()
            .generate(&mut seeded(), 0)
            .unwrap();

        assert!(set.is_empty());
        assert_eq!(set.render(), "");
    }

    #[test]
    fn test_generate_default_fields() {
        let set = TicketSetGenerator::default()
            .generate(&mut seeded(), 3)
            .unwrap();

        assert_eq!(set.len(), 3);
        for ticket in &set {
            assert_eq!(ticket.main.len(), 5);
            assert_eq!(ticket.bonus.len(), 2);
            assert!(distinct_in_range(&ticket.main, 50), "{ticket}");
            assert!(distinct_in_range(&ticket.bonus, 10), "{ticket}");
        }
        assert_eq!(set.render().matches(LINE_BREAK).count(), 3);
    }

    #[test]
    fn test_generate_custom_fields() {
        let generator = TicketSetGenerator::new(FieldSpec::new(6, 49), FieldSpec::new(1, 10))
            .unwrap();

        let set = generator.generate(&mut seeded(), 2).unwrap();

        for ticket in &set {
            assert!(distinct_in_range(&ticket.main, 49));
            assert_eq!(ticket.bonus.len(), 1);
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let generator = TicketSetGenerator::default();

        let first = generator.generate(&mut seeded(), 4).unwrap();
        let second = generator.generate(&mut seeded(), 4).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_new_rejects_impossible_field() {
        let err = TicketSetGenerator::new(FieldSpec::new(5, 50), FieldSpec::new(11, 10))
            .unwrap_err();

        assert_eq!(err, LottoError::InvalidRange { count: 11, max: 10 });
    }

    #[test]
    fn test_field_spec_display() {
        assert_eq!(FieldSpec::new(5, 50).to_string(), "5 of 50");
    }
}
