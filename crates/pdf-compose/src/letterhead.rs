//! Institute letterhead printed on every cover page

use crate::emblem::PathTransform;

/// Outer frame
const EMBLEM_FRAME: &str = "\
    M629 4183 l-586 -3 -6 -83 c-9 -106 -9 -3955 -1 -4024 l7 -53 1613 0 1614 0 -2 2074 c-2 \
    1141 -6 2078 -10 2082 -8 8 -1697 13 -2629 7z m2570 -77 c9 -10 11 -524 9 -2014 -2 -1100 \
    -5 -2003 -8 -2005 -11 -11 -1679 -19 -2372 -12 l-738 7 0 1997 c0 1098 3 2006 6 2019 l6 22 \
    1543 0 c1298 0 1544 -2 1554 -14z";

/// Dot above the book
const EMBLEM_DOT: &str = "\
    M1598 3790 c-71 -21 -131 -87 -144 -157 -17 -91 32 -189 113 -225 169 -75 347 92 278 260 \
    -42 101 -147 152 -247 122z";

/// Open book and column details
const EMBLEM_BOOK: &str = "\
    M1798 3372 c-15 -3 -18 -19 -20 -125 l-3 -122 -123 -3 -122 -3 -10 26 c-6 15 -10 72 -10 \
    127 l0 101 -67 -6 c-152 -13 -355 -87 -497 -180 -494 -323 -655 -985 -375 -1540 55 -108 \
    109 -179 222 -290 l109 -108 -95 -102 c-270 -292 -357 -389 -357 -400 0 -7 16 -25 35 -40 \
    90 -72 99 -195 20 -289 -14 -16 -25 -35 -25 -42 0 -10 122 -14 572 -19 728 -9 1456 -9 1631 \
    0 153 7 160 11 105 66 -53 53 -68 87 -68 149 0 52 4 62 35 97 19 21 49 44 65 51 17 7 30 20 \
    30 28 0 9 -109 124 -242 255 l-243 238 31 27 c17 15 58 51 92 79 153 133 285 355 343 578 \
    29 111 31 133 32 290 0 121 -4 192 -16 245 -92 425 -365 729 -770 859 -98 31 -248 60 -279 \
    53z m-300 -532 c1 -135 0 -255 -3 -266 -4 -20 -13 -22 -152 -27 -82 -3 -164 -10 -183 -16 \
    -142 -43 -241 -200 -210 -333 7 -29 21 -69 30 -88 37 -73 128 -134 229 -155 30 -6 56 -16 \
    59 -23 5 -17 -258 -293 -277 -290 -20 4 -122 135 -166 213 -60 108 -77 174 -82 331 -6 166 \
    8 251 64 379 80 183 233 349 403 436 88 45 215 89 250 86 l35 -2 3 -245z m423 221 c257 -87 \
    430 -233 545 -463 96 -190 122 -420 69 -603 -49 -169 -101 -262 -174 -310 -112 -75 -245 \
    -17 -301 131 -30 81 -26 246 8 311 29 55 80 94 134 99 24 3 58 7 76 10 l32 5 0 149 0 150 \
    -250 0 -250 0 0 275 c0 220 3 275 13 275 7 0 51 -13 98 -29z m-147 -549 c2 -4 8 -337 12 \
    -740 6 -661 9 -732 23 -732 29 1 185 38 251 60 36 12 108 42 160 66 56 27 103 43 115 40 21 \
    -6 433 -412 425 -419 -17 -15 -2234 -12 -2228 2 4 13 376 413 398 429 16 11 24 10 62 -14 \
    112 -71 331 -147 464 -160 l64 -7 0 736 0 736 23 4 c40 8 226 7 231 -1z m676 -1802 c181 0 \
    270 -4 260 -10 -18 -11 -2063 -14 -2125 -2 -53 9 733 20 1210 15 209 -1 504 -3 655 -3z m63 \
    -57 c130 -5 167 -9 167 -20 0 -11 -177 -13 -1044 -13 -906 0 -1045 2 -1049 15 -5 12 10 15 \
    81 18 172 6 1683 7 1845 0z m51 -80 c70 -4 105 -10 103 -17 -5 -16 -2059 -16 -2064 1 -3 7 \
    10 13 34 16 66 7 1815 7 1927 0z m110 -79 c9 -3 16 -12 16 -20 0 -12 -156 -14 -1027 -14 \
    -566 0 -1038 3 -1050 6 -27 7 -30 21 -5 27 26 7 2048 8 2066 1z m63 -78 c4 -3 3 -9 -1 -13 \
    -10 -10 -1948 -17 -2084 -8 -91 6 -101 9 -90 22 12 14 126 15 1091 11 593 -3 1081 -8 1084 \
    -12z";

/// Institute identity drawn in the lower half of the cover
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Letterhead {
    /// First address line, set in bold
    pub name: String,
    pub address_lines: Vec<String>,
    /// Outline path data for the emblem, filled in order
    pub emblem_paths: Vec<String>,
    pub emblem_transform: PathTransform,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            name: "INDIRA GANDHI INSTITUTE OF DEVELOPMENT RESEARCH".to_string(),
            address_lines: vec![
                "Film City Rd".to_string(),
                "Mumbai 400065".to_string(),
                "India".to_string(),
            ],
            emblem_paths: vec![
                EMBLEM_FRAME.to_string(),
                EMBLEM_DOT.to_string(),
                EMBLEM_BOOK.to_string(),
            ],
            // Traced outlines are upside down in their own space; the negative
            // x scale and positive y scale turn them upright.
            emblem_transform: PathTransform {
                origin_x: 397.5,
                origin_y: 240.0,
                scale_x: -0.05,
                scale_y: 0.05,
            },
        }
    }
}
