use crate::snake::Heading;

/// Which direction keys are currently held. The input side writes it, the
/// controller reads it once at the start of every `update`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    held: [bool; 4],
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    pub fn press(&mut self, heading: Heading) {
        self.held[slot(heading)] = true;
    }

    #[cfg(test)]
    pub fn release(&mut self, heading: Heading) {
        self.held[slot(heading)] = false;
    }

    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    pub fn is_held(&self, heading: Heading) -> bool {
        self.held[slot(heading)]
    }

    /// Held headings in latching order.
    pub fn held(&self) -> impl Iterator<Item = Heading> + '_ {
        Heading::ALL.iter().copied().filter(move |h| self.is_held(*h))
    }
}

fn slot(heading: Heading) -> usize {
    match heading {
        Heading::Left => 0,
        Heading::Up => 1,
        Heading::Right => 2,
        Heading::Down => 3,
    }
}
