pub const REPORT_ID: &str = "AbCd1234EfGh5678";
pub const REPORT_START: i64 = 1_600_000_000_000;
pub const REPORT_END: i64 = 1_600_003_600_000;

pub const ITEM_FROSTWOLF_CLOAK: i64 = 30_100;
pub const ITEM_SOCKETED_CHEST: i64 = 30_101;
pub const ITEM_RANDOM_HELM: i64 = 30_102;
pub const ITEM_RANDOM_RING: i64 = 30_103;
pub const ITEM_FIRE_SHIRT: i64 = 30_104;
pub const ITEM_UNENCHANTABLE_OFF_HAND: i64 = 30_105;

pub const ENCHANT_FROST_GUARD: i64 = 2484;
pub const GEM_CHROMATIC_FOUR: i64 = 22459;
pub const GEM_CHROMATIC_THREE: i64 = 22460;

pub const ABILITY_HEROIC_STRIKE: i64 = 25286;
pub const ABILITY_PUMMEL: i64 = 6552;
pub const ABILITY_GREATER_HEAL: i64 = 25213;
pub const ABILITY_PET_INTERRUPT: i64 = 19647;

pub const BUFF_FORTITUDE: i64 = 10938;
pub const BUFF_SHADOW_PROTECTION: i64 = 25433;
