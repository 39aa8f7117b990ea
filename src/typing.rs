use std::time::Duration;

use crate::config::TypingConfig;

/// Text to display and how long to wait before the next frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub hold_delay: Duration,
    pub advance_delay: Duration,
}

impl From<&TypingConfig> for Cadence {
    fn from(config: &TypingConfig) -> Self {
        Self {
            type_delay: config.type_delay,
            delete_delay: config.delete_delay,
            hold_delay: config.hold_delay,
            advance_delay: config.advance_delay,
        }
    }
}

/// Types each role out one character at a time, holds, erases it, and moves
/// on to the next role, wrapping forever. Yields nothing for an empty list.
#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<Vec<char>>,
    cadence: Cadence,
    role_index: usize,
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new(roles: &[String], cadence: Cadence) -> Self {
        Self {
            roles: roles
                .iter()
                .filter(|role| !role.is_empty())
                .map(|role| role.chars().collect())
                .collect(),
            cadence,
            role_index: 0,
            char_index: 0,
            deleting: false,
        }
    }

    pub fn from_config(config: &TypingConfig) -> Self {
        Self::new(&config.roles, Cadence::from(config))
    }

    pub fn restart(&mut self) {
        self.role_index = 0;
        self.char_index = 0;
        self.deleting = false;
    }

    pub fn cursor(&self) -> (usize, usize, bool) {
        (self.role_index, self.char_index, self.deleting)
    }
}

impl Iterator for Typewriter {
    type Item = TypingFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let role = self.roles.get(self.role_index)?;

        let mut delay = if self.deleting {
            self.char_index -= 1;
            self.cadence.delete_delay
        } else {
            self.char_index += 1;
            self.cadence.type_delay
        };
        let text: String = role[..self.char_index].iter().collect();

        if !self.deleting && self.char_index == role.len() {
            delay = self.cadence.hold_delay;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            delay = self.cadence.advance_delay;
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
        }

        Some(TypingFrame { text, delay })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cadence() -> Cadence {
        Cadence::from(&TypingConfig::default())
    }

    fn roles(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn builds_holds_tears_down_and_advances() {
        let mut writer = Typewriter::new(&roles(&["ab", "c"]), cadence());
        let frames: Vec<_> = writer
            .by_ref()
            .take(6)
            .map(|frame| (frame.text, frame.delay))
            .collect();

        assert_eq!(
            frames,
            vec![
                ("a".to_string(), ms(100)),
                ("ab".to_string(), ms(2_000)),
                ("a".to_string(), ms(50)),
                ("".to_string(), ms(500)),
                ("c".to_string(), ms(2_000)),
                ("".to_string(), ms(500)),
            ]
        );
    }

    #[test]
    fn wraps_to_first_role_after_last() {
        let mut writer = Typewriter::new(&roles(&["x", "y"]), cadence());
        let texts: Vec<_> = writer.by_ref().take(6).map(|frame| frame.text).collect();
        assert_eq!(texts, vec!["x", "", "y", "", "x", ""]);
    }

    #[test]
    fn multibyte_roles_advance_by_character() {
        let mut writer = Typewriter::new(&roles(&["héllo"]), cadence());
        let texts: Vec<_> = writer.by_ref().take(3).map(|frame| frame.text).collect();
        assert_eq!(texts, vec!["h", "hé", "hél"]);
    }

    #[test]
    fn empty_role_list_yields_nothing() {
        let mut writer = Typewriter::new(&roles(&["", ""]), cadence());
        assert_eq!(writer.next(), None);
    }

    #[test]
    fn restart_returns_to_first_role() {
        let mut writer = Typewriter::new(&roles(&["one", "two"]), cadence());
        writer.by_ref().take(8).for_each(drop);
        assert_eq!(writer.cursor().0, 1);

        writer.restart();
        assert_eq!(writer.cursor(), (0, 0, false));
        assert_eq!(writer.next().map(|frame| frame.text).as_deref(), Some("o"));
    }
}
