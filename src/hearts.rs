//! Floating hearts shown after an interaction.
//!
//! Purely cosmetic. Everything is counted in ticks so no wall clock is
//! involved: spawns are scheduled a few ticks ahead and each heart lives
//! for a fixed number of ticks.

use crate::model::PetColor;

pub const HEART_LIFESPAN: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heart {
    /// `None` means the default heart pink.
    pub color: Option<PetColor>,
    pub lifespan: u32,
    /// How far the heart has drifted up, in ticks travelled.
    pub rise: u32,
}

impl Heart {
    /// 1.0 when fresh, 0.0 when about to vanish.
    pub fn alpha(&self) -> f32 {
        self.lifespan as f32 / HEART_LIFESPAN as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pending {
    in_ticks: u32,
    color: Option<PetColor>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hearts {
    live: Vec<Heart>,
    pending: Vec<Pending>,
}

impl Hearts {
    pub fn spawn(&mut self, color: Option<PetColor>) {
        self.live.push(Heart {
            color,
            lifespan: HEART_LIFESPAN,
            rise: 0,
        });
    }

    pub fn schedule(&mut self, in_ticks: u32, color: Option<PetColor>) {
        if in_ticks == 0 {
            self.spawn(color);
        } else {
            self.pending.push(Pending { in_ticks, color });
        }
    }

    pub fn advance(&mut self) {
        for h in &mut self.live {
            h.lifespan = h.lifespan.saturating_sub(1);
            h.rise += 1;
        }
        self.live.retain(|h| h.lifespan > 0);

        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.in_ticks -= 1;
            if p.in_ticks == 0 {
                due.push(p.color);
                false
            } else {
                true
            }
        });
        for color in due {
            self.spawn(color);
        }
    }

    pub fn live(&self) -> &[Heart] {
        &self.live
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_hearts_appear_on_time_and_expire() {
        let mut hearts = Hearts::default();
        hearts.spawn(None);
        hearts.schedule(2, Some(PetColor::Blue));
        assert_eq!(hearts.live().len(), 1);

        hearts.advance();
        assert_eq!(hearts.live().len(), 1);
        hearts.advance();
        assert_eq!(hearts.live().len(), 2);
        assert_eq!(hearts.pending(), 0);
        assert_eq!(hearts.live()[1].color, Some(PetColor::Blue));

        for _ in 0..HEART_LIFESPAN {
            hearts.advance();
        }
        assert!(hearts.live().is_empty());
    }

    #[test]
    fn alpha_fades_with_age() {
        let mut hearts = Hearts::default();
        hearts.spawn(None);
        assert_eq!(hearts.live()[0].alpha(), 1.0);
        for _ in 0..30 {
            hearts.advance();
        }
        assert_eq!(hearts.live()[0].alpha(), 0.5);
        assert_eq!(hearts.live()[0].rise, 30);
    }
}
