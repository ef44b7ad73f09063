//! Printed characters of every supported layout, indexed by US QWERTY key position.
//!
//! Each layout is two rows of 47 characters: the unshifted and the shifted
//! output of the same physical keys, in the order of [`EN_UNSHIFT`] / [`EN_SHIFT`].
//! A layout that prints the same character as English on some key simply
//! repeats the English character there.
//!
//! Rows must stay injective: no character may appear twice within one layout,
//! otherwise the reverse lookup (character -> key) is ambiguous.

pub(crate) const KEYS_PER_ROW: usize = 47;

// Physical key order (US QWERTY).
pub(crate) const EN_UNSHIFT: &str = "`1234567890-=qwertyuiop[]\\asdfghjkl;'zxcvbnm,./";
pub(crate) const EN_SHIFT: &str = "~!@#$%^&*()_+QWERTYUIOP{}|ASDFGHJKL:\"ZXCVBNM<>?";

// Persian, ISIRI 9147. `d` and `;` print Persian yeh/kaf; Shift+D and Shift+Z are
// left on their English characters so that Arabic yeh/kaf only ever come from
// the legacy layout.
pub(crate) const FA_UNSHIFT: &str = concat!(
    "\u{200D}",
    "۱۲۳۴۵۶۷۸۹۰-=",
    "ضصثقفغعهخحجچ\\",
    "شس\u{06CC}بلاتنم\u{06A9}گ",
    "ظطزرذدپو./",
);
pub(crate) const FA_SHIFT: &str = concat!(
    "÷!٬٫﷼٪×،*)(ـ+",
    "\u{0652}\u{064C}\u{064D}\u{064B}\u{064F}\u{0650}\u{064E}\u{0651}][}{|",
    "ؤئDإأآة»«:؛",
    "Z\u{0653}ژ\u{0670}\u{200C}\u{0654}ء><؟",
);

// Persian, pre-ISIRI Windows layout. Arabic yeh/kaf on `d` and `;`, pe on the
// backslash key, hamza-yeh on `m`.
pub(crate) const FA_LEGACY_UNSHIFT: &str = concat!(
    "÷",
    "۱۲۳۴۵۶۷۸۹۰-=",
    "ضصثقفغعهخحجچپ",
    "شس\u{064A}بلاتنم\u{0643}گ",
    "ظطزرذدئو./",
);
pub(crate) const FA_LEGACY_SHIFT: &str = concat!(
    "×!@#$٪^&*)(ـ+",
    "\u{064B}\u{064C}\u{064D}﷼،؛,][\\}{|",
    "\u{064E}\u{064F}\u{0650}\u{0651}ۀآة»«:\"",
    "'\u{0654}ژؤإأء><؟",
);

// Arabic (101).
pub(crate) const AR_UNSHIFT: &str = concat!(
    "ذ",
    "١٢٣٤٥٦٧٨٩٠-=",
    "ضصثقفغعهخحجد\\",
    "شس\u{064A}بلاتنم\u{0643}ط",
    "ئءؤر\u{FEFB}\u{0649}ةوزظ",
);
pub(crate) const AR_SHIFT: &str = concat!(
    "\u{0651}!@#$%^&*)(_+",
    "\u{064E}\u{064B}\u{064F}\u{064C}\u{FEF9}إ\u{2018}÷×؛<>|",
    "\u{0650}\u{064D}][\u{FEF7}أـ،/:\"",
    "~\u{0652}}{\u{FEF5}آ\u{2019},.؟",
);

// Russian ЙЦУКЕН.
pub(crate) const RU_UNSHIFT: &str = "ё1234567890-=йцукенгшщзхъ\\фывапролджэячсмитьбю.";
pub(crate) const RU_SHIFT: &str = "Ё!\"№;%:?*()_+ЙЦУКЕНГШЩЗХЪ/ФЫВАПРОЛДЖЭЯЧСМИТЬБЮ,";

// Turkish Q.
pub(crate) const TR_UNSHIFT: &str = "\"1234567890*-qwertyuıopğü,asdfghjklşizxcvbnmöç.";
pub(crate) const TR_SHIFT: &str = "é!'^+%&/()=?_QWERTYUIOPĞÜ;ASDFGHJKLŞİZXCVBNMÖÇ:";

// Hebrew SI-1452. Shifted row keeps Latin capitals; brackets are mirrored.
pub(crate) const HE_UNSHIFT: &str = ";1234567890-=/'קראטוןםפ][\\שדגכעיחלךף,זסבהנמצתץ.";
pub(crate) const HE_SHIFT: &str = "~!@#$%^&*)(_+QWERTYUIOP}{|ASDFGHJKL:\"ZXCVBNM><?";

/// Standard-layout letters that the legacy layout never produces (same keys as
/// [`LEGACY_ONLY`]).
pub(crate) const STANDARD_ONLY: &[char] = &['\u{06CC}', '\u{06A9}'];

/// Legacy-layout letters that the standard layout never produces.
pub(crate) const LEGACY_ONLY: &[char] = &['\u{064A}', '\u{0643}'];
