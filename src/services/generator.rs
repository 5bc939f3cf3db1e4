//! Random values handed out by the gadget service.
//!
//! Nothing here is security sensitive: codenames and probabilities are flavour,
//! and self-destruct codes are never checked against anything.

use rand::Rng;

use crate::constants::{codename, probability, self_destruct};

pub trait CodeGenerator: Send + Sync {
    /// `"The {Adjective} {Noun}"`, one word from each list.
    fn codename(&self) -> String;

    /// Integer percentage in `50..=99`.
    fn success_probability(&self) -> u8;

    /// Six characters from the unambiguous confirmation alphabet.
    fn self_destruct_code(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn codename(&self) -> String {
        let mut rng = rand::rng();
        let adjective = codename::ADJECTIVES[rng.random_range(0..codename::ADJECTIVES.len())];
        let noun = codename::NOUNS[rng.random_range(0..codename::NOUNS.len())];
        format!("The {adjective} {noun}")
    }

    fn success_probability(&self) -> u8 {
        rand::rng().random_range(probability::SUCCESS_RANGE)
    }

    fn self_destruct_code(&self) -> String {
        let mut rng = rand::rng();
        (0..self_destruct::CODE_LENGTH)
            .map(|_| char::from(self_destruct::ALPHABET[rng.random_range(0..self_destruct::ALPHABET.len())]))
            .collect()
    }
}
