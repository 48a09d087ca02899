/// A single weekday vocabulary item. Every field value is unique across the
/// table, so options can be compared by string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub kanji: &'static str,
    pub hiragana: &'static str,
    pub romaji: &'static str,
    pub english: &'static str,
}

/// Which written form of an entry is being asked about or answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Kanji,
    Hiragana,
    Romaji,
    English,
}

impl VocabEntry {
    pub fn field(&self, field: Field) -> &'static str {
        match field {
            Field::Kanji => self.kanji,
            Field::Hiragana => self.hiragana,
            Field::Romaji => self.romaji,
            Field::English => self.english,
        }
    }
}

pub const DAYS_OF_WEEK: [VocabEntry; 7] = [
    VocabEntry {
        kanji: "月曜日",
        hiragana: "げつようび",
        romaji: "getsuyōbi",
        english: "monday",
    },
    VocabEntry {
        kanji: "火曜日",
        hiragana: "かようび",
        romaji: "kayōbi",
        english: "tuesday",
    },
    VocabEntry {
        kanji: "水曜日",
        hiragana: "すいようび",
        romaji: "suiyōbi",
        english: "wednesday",
    },
    VocabEntry {
        kanji: "木曜日",
        hiragana: "もくようび",
        romaji: "mokuyōbi",
        english: "thursday",
    },
    VocabEntry {
        kanji: "金曜日",
        hiragana: "きんようび",
        romaji: "kinyōbi",
        english: "friday",
    },
    VocabEntry {
        kanji: "土曜日",
        hiragana: "どようび",
        romaji: "doyōbi",
        english: "saturday",
    },
    VocabEntry {
        kanji: "日曜日",
        hiragana: "にちようび",
        romaji: "nichiyōbi",
        english: "sunday",
    },
];

/// All values of one field, in table order. Used to build option pools.
pub fn field_values(field: Field) -> Vec<&'static str> {
    DAYS_OF_WEEK.iter().map(|day| day.field(field)).collect()
}
