//! Effect-code compiler.
//!
//! Catalog option and trait data embed a compact grammar of `:`-separated
//! tokens. Each token is parsed into an [`EffectToken`] and the tokens are
//! folded into one [`EffectDelta`].
//!
//! | token | meaning |
//! |---|---|
//! | `L="name"` | language |
//! | `T<code>` | trait flag, kept verbatim |
//! | `I<code>` | immunity (see [`tables::immunity`]) |
//! | `X…` / `Z…` / `Y…` | action / reaction / free-action usage |
//! | `W…` | conditional effect, kept unevaluated |
//! | `A<CAT><SUB>=<±int>` | numeric bonus |
//! | `VD<SUB>` | vision grant |
//!
//! Tokens that do not match the grammar are skipped so newer catalog content
//! keeps loading on older engines.

use super::delta::{ActionUsage, EffectDelta, UsageKind, bump};
use super::tables::{self, Craft, Immunity, Mitigation, SkillSlot, Vision, WeaponSkill};

/// Token separator in effect-code strings.
pub const TOKEN_SEPARATOR: char = ':';

/// Where an `A…` bonus lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusTarget {
    /// `S<SUB>`: skill or initiative
    Skill(SkillSlot),
    /// `C<SUB>`
    Craft(Craft),
    /// `Z<SUB>`
    WeaponSkill(WeaponSkill),
    /// `D<SUB>`
    Mitigation(Mitigation),
    /// `H` (no sub-code)
    Health,
    /// `V` (no sub-code)
    Movement,
}

/// One parsed token of the effect grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectToken {
    Language(String),
    TraitFlag(String),
    Immunity(Immunity),
    Usage { code: String, usage: ActionUsage },
    Conditional(String),
    Bonus { target: BonusTarget, amount: i32 },
    Vision(Vision),
}

impl EffectToken {
    /// Parses a single token. Returns `None` for anything outside the grammar.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(name) = token.strip_prefix("L=") {
            return parse_language(name);
        }

        let mut chars = token.chars();
        let head = chars.next()?;
        let rest = chars.as_str();

        match head {
            'T' if !rest.is_empty() => Some(EffectToken::TraitFlag(token.to_string())),
            'I' => tables::immunity(rest).map(EffectToken::Immunity),
            'X' | 'Z' | 'Y' => parse_usage(head, rest).map(|usage| EffectToken::Usage {
                code: token.to_string(),
                usage,
            }),
            'W' if !rest.is_empty() => Some(EffectToken::Conditional(token.to_string())),
            'A' => parse_bonus(rest),
            'V' => rest
                .strip_prefix('D')
                .and_then(tables::vision)
                .map(EffectToken::Vision),
            _ => None,
        }
    }

    /// Folds this token into a delta.
    pub fn apply_to(self, delta: &mut EffectDelta) {
        match self {
            EffectToken::Language(name) => {
                delta.languages.insert(name);
            }
            EffectToken::TraitFlag(flag) => {
                delta.trait_flags.insert(flag);
            }
            EffectToken::Immunity(immunity) => {
                delta.immunities.insert(immunity);
            }
            EffectToken::Usage { code, usage } => {
                delta.usages.insert(code, usage);
            }
            EffectToken::Conditional(raw) => delta.conditionals.push(raw),
            EffectToken::Bonus { target, amount } => match target {
                BonusTarget::Skill(slot) => delta.add_skill_slot(slot, amount),
                BonusTarget::Craft(craft) => bump(delta.crafts.entry(craft).or_default(), amount),
                BonusTarget::WeaponSkill(weapon) => {
                    bump(delta.weapon_skills.entry(weapon).or_default(), amount)
                }
                BonusTarget::Mitigation(channel) => {
                    bump(delta.mitigation.entry(channel).or_default(), amount)
                }
                BonusTarget::Health => bump(&mut delta.health, amount),
                BonusTarget::Movement => bump(&mut delta.movement, amount),
            },
            EffectToken::Vision(vision) => delta.vision |= vision,
        }
    }
}

/// Compiles effect-code strings into [`EffectDelta`] values.
pub struct EffectCompiler;

impl EffectCompiler {
    /// Compiles one effect-code string.
    ///
    /// # Example
    /// ```
    /// # use chargen_core::effect::{EffectCompiler, Skill};
    /// let delta = EffectCompiler::compile("AS3=1:ASH=1:AH=5");
    /// assert_eq!(delta.skill(Skill::Stealth), 1);
    /// assert_eq!(delta.initiative, 1);
    /// assert_eq!(delta.health, 5);
    /// ```
    pub fn compile(data: &str) -> EffectDelta {
        let mut delta = EffectDelta::new();
        for token in Self::tokens(data) {
            token.apply_to(&mut delta);
        }
        delta
    }

    /// Parses every recognizable token in `data`, in order.
    pub fn tokens(data: &str) -> impl Iterator<Item = EffectToken> + '_ {
        data.split(TOKEN_SEPARATOR)
            .filter(|raw| !raw.trim().is_empty())
            .filter_map(|raw| {
                let parsed = EffectToken::parse(raw);
                if parsed.is_none() {
                    tracing::trace!(token = raw, "skipping unrecognized effect token");
                }
                parsed
            })
    }
}

fn parse_language(raw: &str) -> Option<EffectToken> {
    let name = raw.trim().trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(EffectToken::Language(name.to_string()))
    }
}

/// `<kind>[D][digits]` with the kind character already consumed.
fn parse_usage(kind: char, rest: &str) -> Option<ActionUsage> {
    let kind = UsageKind::from_code(kind)?;
    let (daily, count) = match rest.strip_prefix('D') {
        Some(count) => (true, count),
        None => (false, rest),
    };

    let uses = if count.is_empty() {
        1
    } else if count.bytes().all(|b| b.is_ascii_digit()) {
        count.parse().ok()?
    } else {
        return None;
    };

    Some(ActionUsage { kind, daily, uses })
}

/// `<CAT><SUB>=<±int>` with the leading `A` already consumed.
fn parse_bonus(rest: &str) -> Option<EffectToken> {
    let (selector, value) = rest.split_once('=')?;
    let amount: i32 = value.trim().parse().ok()?;

    let mut chars = selector.chars();
    let category = chars.next()?;
    let sub = chars.as_str();

    let target = match category {
        'S' => BonusTarget::Skill(tables::skill_slot(sub)?),
        'C' => BonusTarget::Craft(tables::craft(sub)?),
        'Z' => BonusTarget::WeaponSkill(tables::weapon_skill(sub)?),
        'D' => BonusTarget::Mitigation(tables::mitigation(sub)?),
        'H' if sub.is_empty() => BonusTarget::Health,
        'V' if sub.is_empty() => BonusTarget::Movement,
        _ => return None,
    };

    Some(EffectToken::Bonus { target, amount })
}
