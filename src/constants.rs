use std::sync::LazyLock;
use std::time::Duration;

use hashbrown::HashMap;

use crate::models::Element;

pub const API_URL: &str = "https://classic.warcraftlogs.com/v1";
pub const DEFAULT_ITEM_DATA_PATH: &str = "./data";
pub const REQUESTS_PER_WINDOW: usize = 25;
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(1);

pub const SUMMARY_ENCOUNTER_ID: i64 = -1;
pub const TRASH_ENCOUNTER_ID: i64 = 0;
pub const EMPTY_SOCKET_GEM_ID: i64 = 0;

pub const SLOT_HEAD: u32 = 0;
pub const SLOT_NECK: u32 = 1;
pub const SLOT_SHOULDERS: u32 = 2;
pub const SLOT_SHIRT: u32 = 3;
pub const SLOT_CHEST: u32 = 4;
pub const SLOT_BELT: u32 = 5;
pub const SLOT_LEGS: u32 = 6;
pub const SLOT_FEET: u32 = 7;
pub const SLOT_WRISTS: u32 = 8;
pub const SLOT_HANDS: u32 = 9;
pub const SLOT_FINGER1: u32 = 10;
pub const SLOT_FINGER2: u32 = 11;
pub const SLOT_TRINKET1: u32 = 12;
pub const SLOT_TRINKET2: u32 = 13;
pub const SLOT_BACK: u32 = 14;
pub const SLOT_MAIN_HAND: u32 = 15;
pub const SLOT_OFF_HAND: u32 = 16;
pub const SLOT_RANGED: u32 = 17;
pub const SLOT_TABARD: u32 = 18;

pub const UNENCHANTABLE_SLOTS: [u32; 9] = [
    SLOT_NECK,
    SLOT_SHIRT,
    SLOT_BELT,
    SLOT_FINGER1,
    SLOT_FINGER2,
    SLOT_TRINKET1,
    SLOT_TRINKET2,
    SLOT_RANGED,
    SLOT_TABARD,
];

/// Item level to resistance granted by "of X Resistance" random suffixes.
/// Entries flagged rare/epic are the odd item levels those qualities drop at.
pub static HIGH_RESIST: &[(u32, u32)] = &[
    (120, 37), (117, 36), (114, 35), (111, 34),
    (109, 39), // rare
    (108, 33), (105, 32), (102, 31), (99, 30), (96, 29), (93, 28), (90, 27), (87, 26), (84, 25),
    (82, 31), // rare
    (81, 24),
];

pub static MED_RESIST: &[(u32, u32)] = &[
    (120, 27), (117, 27), (114, 26), (111, 25),
    (109, 30), // rare
    (108, 25), (105, 23), (102, 23), (99, 22), (96, 21), (93, 21),
    (91, 26), // rare
    (90, 20), (87, 19), (84, 19), (81, 17),
];

pub static LOW_RESIST: &[(u32, u32)] = &[
    (120, 21), (117, 20),
    (115, 27), // epic
    (114, 19), (111, 19), (108, 18), (105, 17),
    (103, 21), // rare
    (102, 17), (99, 17), (96, 16),
    (94, 19), // rare
    (93, 15), (90, 15), (87, 14), (84, 13), (81, 13),
];

pub fn random_enchant_table(slot: u32) -> Option<&'static [(u32, u32)]> {
    match slot {
        SLOT_HEAD | SLOT_CHEST | SLOT_LEGS => Some(HIGH_RESIST),
        SLOT_SHOULDERS | SLOT_BELT | SLOT_FEET | SLOT_HANDS => Some(MED_RESIST),
        SLOT_NECK | SLOT_WRISTS | SLOT_FINGER1 | SLOT_FINGER2 | SLOT_BACK | SLOT_OFF_HAND => Some(LOW_RESIST),
        _ => None,
    }
}

pub fn random_enchant_resistance(slot: u32, item_level: u32) -> Option<u32> {
    random_enchant_table(slot)?
        .iter()
        .find(|(level, _)| *level == item_level)
        .map(|(_, amount)| *amount)
}

pub type ResistanceTable = HashMap<i64, Vec<(Element, u32)>>;

fn all_elements(amount: u32) -> Vec<(Element, u32)> {
    Element::ALL.iter().map(|element| (*element, amount)).collect()
}

pub static RESISTANCE_GEMS: LazyLock<ResistanceTable> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert(22459, all_elements(4));
    map.insert(22460, all_elements(3));
    map
});

pub static RESISTANCE_ENCHANTS: LazyLock<ResistanceTable> = LazyLock::new(|| {
    use Element::*;

    let mut map = HashMap::new();
    map.insert(1441, vec![(Shadow, 15)]); // Enchant Cloak - Greater Shadow Resistance
    map.insert(1257, vec![(Arcane, 15)]); // Enchant Cloak - Greater Arcane Resistance
    map.insert(2664, all_elements(7)); // Enchant Cloak - Major Resistance
    map.insert(1888, all_elements(5)); // Enchant Shield - Resistance
    map.insert(2620, vec![(Nature, 15)]); // Enchant Cloak - Greater Nature Resistance
    map.insert(2619, vec![(Fire, 15)]); // Enchant Cloak - Greater Fire Resistance
    map.insert(926, vec![(Frost, 8)]); // Enchant Shield - Frost Resistance
    map.insert(903, all_elements(3)); // Enchant Cloak - Resistance
    map.insert(2463, vec![(Fire, 7)]); // Enchant Cloak - Fire Resistance
    map.insert(804, vec![(Shadow, 10)]); // Enchant Cloak - Lesser Shadow Resistance
    map.insert(256, vec![(Fire, 5)]); // Enchant Cloak - Lesser Fire Resistance
    map.insert(65, all_elements(1)); // Enchant Cloak - Minor Resistance
    map.insert(2984, vec![(Shadow, 8)]); // Shadow Armor Kit
    map.insert(3009, vec![(Shadow, 20)]); // Glyph of Shadow Warding
    map.insert(2683, vec![(Shadow, 10)]); // Shadow Guard
    map.insert(2998, all_elements(7)); // Inscription of Endurance
    map.insert(2985, vec![(Fire, 8)]); // Flame Armor Kit
    map.insert(2487, vec![(Shadow, 5)]); // Shadow Mantle of the Dawn
    map.insert(1505, vec![(Fire, 20)]); // Lesser Arcanum of Resilience
    map.insert(3007, vec![(Fire, 20)]); // Glyph of Fire Warding
    map.insert(2988, vec![(Nature, 8)]); // Nature Armor Kit
    map.insert(2987, vec![(Frost, 8)]); // Frost Armor Kit
    map.insert(3008, vec![(Frost, 20)]); // Glyph of Frost Warding
    map.insert(2488, all_elements(5)); // Chromatic Mantle of the Dawn
    map.insert(2989, vec![(Arcane, 8)]); // Arcane Armor Kit
    map.insert(2681, vec![(Nature, 10)]); // Savage Guard
    map.insert(3095, all_elements(8)); // Glyph of Chromatic Warding
    map.insert(2483, vec![(Fire, 5)]); // Flame Mantle of the Dawn
    map.insert(3006, vec![(Arcane, 20)]); // Glyph of Arcane Warding
    map.insert(2485, vec![(Arcane, 5)]); // Arcane Mantle of the Dawn
    map.insert(2682, vec![(Frost, 10)]); // Ice Guard
    map.insert(2484, vec![(Frost, 5)]); // Frost Mantle of the Dawn
    map.insert(2486, vec![(Nature, 5)]); // Nature Mantle of the Dawn
    map
});

pub static RESISTANCE_BUFFS: LazyLock<ResistanceTable> = LazyLock::new(|| {
    use Element::*;

    let mut map = HashMap::new();
    map.insert(976, vec![(Shadow, 30)]); // Shadow Protection (Rank 1)
    map.insert(10957, vec![(Shadow, 45)]); // Shadow Protection (Rank 2)
    map.insert(10958, vec![(Shadow, 60)]); // Shadow Protection (Rank 3)
    map.insert(39226, vec![(Shadow, 60)]); // Prayer of Shadow Protection (Rank 1)
    map.insert(25433, vec![(Shadow, 70)]); // Shadow Protection (Rank 4)
    map.insert(39374, vec![(Shadow, 70)]); // Prayer of Shadow Protection (Rank 2)
    map.insert(6117, all_elements(5)); // Mage Armor (Rank 1)
    map.insert(22782, all_elements(10)); // Mage Armor (Rank 2)
    map.insert(22783, all_elements(15)); // Mage Armor (Rank 3)
    map.insert(27125, all_elements(18)); // Mage Armor (Rank 4)
    map.insert(45619, all_elements(8)); // Broiled Bloodfin
    map.insert(42735, all_elements(35)); // Flask of Chromatic Wonder
    map.insert(17629, all_elements(25)); // Flask of Chromatic Resistance
    map
});
