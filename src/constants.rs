pub mod codename {
    pub const ADJECTIVES: [&str; 32] = [
        "Silent", "Midnight", "Phantom", "Shadow", "Ghost", "Covert", "Stealth", "Rogue",
        "Invisible", "Quantum", "Crystal", "Mystic", "Sonic", "Viper", "Cobra", "Eagle",
        "Arctic", "Desert", "Jungle", "Urban", "Cyber", "Digital", "Analog", "Tactical",
        "Supreme", "Ultimate", "Extreme", "Maximum", "Nano", "Micro", "Mega", "Ultra",
    ];

    pub const NOUNS: [&str; 32] = [
        "Nightingale", "Kraken", "Phoenix", "Dragon", "Tiger", "Panther", "Falcon", "Wolf",
        "Sentinel", "Guardian", "Protector", "Defender", "Ghost", "Specter", "Shadow", "Phantom",
        "Blade", "Dagger", "Sword", "Shield", "Arrow", "Dart", "Bullet", "Missile",
        "Eagle", "Hawk", "Owl", "Raven", "Serpent", "Viper", "Cobra", "Scorpion",
    ];

    /// Candidates tried before `create` gives up with a conflict.
    /// Twice the size of the codename space.
    pub const MAX_ATTEMPTS: usize = 2 * ADJECTIVES.len() * NOUNS.len();
}

pub mod self_destruct {
    /// No 0/O or 1/I, which are easy to misread.
    pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    pub const CODE_LENGTH: usize = 6;
}

pub mod token {
    /// Longest accepted session lifetime: one leap year.
    pub const MAX_TTL_HOURS: i64 = 366 * 24;
}

pub mod probability {
    use std::ops::RangeInclusive;

    pub const SUCCESS_RANGE: RangeInclusive<u8> = 50..=99;
}
