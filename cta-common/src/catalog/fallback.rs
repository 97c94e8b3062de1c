//! Built-in reference catalog
//!
//! Served whenever the relational dataset cannot be read or projects to
//! nothing. Static and independent of any dataset.

use crate::catalog::document::{
    CassetteSide, Session, SessionPersonnel, SideLetter, SideMetadata, Track,
};

/// The reference catalog, ordered like a projection
pub fn fallback_sides() -> Vec<CassetteSide> {
    vec![
        tape_013_a(),
        tape_013_b(),
        tape_027_a(),
        tape_042_a(),
        tape_065_a(),
        tape_089_b(),
    ]
}

struct Header {
    album_title: &'static str,
    main_artist: &'static str,
    genre: &'static str,
    record_date_display: &'static str,
    audio_type: &'static str,
    dolby: &'static str,
    tape_selector: &'static str,
    catalog_number: &'static str,
}

fn side(
    tape_number: &str,
    side_letter: SideLetter,
    header: Header,
    sessions: Vec<Session>,
) -> CassetteSide {
    CassetteSide {
        tape_number: tape_number.to_string(),
        side_letter,
        filename: format!("Tape{}{}", tape_number, side_letter),
        has_audio: true,
        metadata: SideMetadata {
            album_title: header.album_title.to_string(),
            main_artist: header.main_artist.to_string(),
            genre: header.genre.to_string(),
            record_date_display: header.record_date_display.to_string(),
            audio_type: header.audio_type.to_string(),
            dolby: header.dolby.to_string(),
            tape_selector: header.tape_selector.to_string(),
            catalog_number: header.catalog_number.to_string(),
        },
        sessions,
    }
}

fn session(
    code: Option<&str>,
    date: &str,
    location: &str,
    personnel: &[(&str, &str, &str)],
    tracks: Vec<Track>,
) -> Session {
    Session {
        session_code: code.map(str::to_string),
        session_date: Some(date.to_string()),
        location: Some(location.to_string()),
        session_personnel: personnel
            .iter()
            .map(|(name, role, source_key)| SessionPersonnel {
                name: name.to_string(),
                role: role.to_string(),
                source_key: source_key.to_string(),
            })
            .collect(),
        tracks,
    }
}

/// Track whose original line is reconstructed from its fields:
/// `"{seq}. {counter:03} {title} ({min}:{sec:02})"` plus the vocalist note
fn track(sequence: i64, counter_start: i64, title: &str, min: i64, sec: i64) -> Track {
    Track {
        sequence,
        counter_start,
        title: title.to_string(),
        duration_min: min,
        duration_sec: sec,
        artist_display: None,
        vocalist_display: None,
        track_specific_credits: None,
        original_text: Some(format!(
            "{}. {:03} {} ({}:{:02})",
            sequence, counter_start, title, min, sec
        )),
    }
}

fn with_vocalist(mut track: Track, vocalist: &str) -> Track {
    track.original_text = track
        .original_text
        .map(|line| format!("{} {}", line, vocalist));
    track.vocalist_display = Some(vocalist.to_string());
    track
}

const MONROE_1940: &[(&str, &str, &str)] = &[
    ("Bill Monroe", "Mandolin, Vocals", "a"),
    ("Cleo Davis", "Guitar", "b"),
    ("Tommy Magness", "Fiddle", "c"),
    ("Amos Garren", "Bass", "d"),
];

const MONROE_1941: &[(&str, &str, &str)] = &[
    ("Bill Monroe", "Mandolin, Vocals", "a"),
    ("Pete Pyle", "Guitar", "e"),
    ("Tommy Magness", "Fiddle", "c"),
    ("Bill Westbrooks", "Bass", "f"),
];

fn bluegrass_header() -> Header {
    Header {
        album_title: "The Best of Bluegrass 1940-1941",
        main_artist: "Bill Monroe & His Blue Grass Boys",
        genre: "Bluegrass",
        record_date_display: "1940-1941",
        audio_type: "Mono",
        dolby: "None",
        tape_selector: "Normal",
        catalog_number: "MCA-527",
    }
}

fn tape_013_a() -> CassetteSide {
    side(
        "013",
        SideLetter::A,
        bluegrass_header(),
        vec![
            session(
                Some("October 1940 Session"),
                "October 7, 1940",
                "RCA Victor Studio, Chicago",
                MONROE_1940,
                vec![
                    track(1, 0, "Mule Skinner Blues", 2, 48),
                    track(2, 140, "Six White Horses", 2, 52),
                    with_vocalist(track(3, 285, "Kentucky Waltz", 3, 15), "Voc: Monroe"),
                ],
            ),
            session(
                Some("February 1941 Session"),
                "February 17, 1941",
                "RCA Victor Studio, Chicago",
                MONROE_1941,
                vec![
                    track(4, 490, "In the Pines", 2, 35),
                    track(5, 625, "Goodbye Old Pal", 3, 8),
                ],
            ),
        ],
    )
}

fn tape_013_b() -> CassetteSide {
    side(
        "013",
        SideLetter::B,
        bluegrass_header(),
        vec![session(
            None,
            "1941",
            "RCA Victor Studio, Chicago",
            MONROE_1941,
            vec![
                track(1, 0, "Heavy Traffic Ahead", 2, 42),
                with_vocalist(track(2, 135, "Blue Yodel No. 4", 3, 22), "Voc: Monroe"),
                track(3, 320, "Dog House Blues", 2, 58),
            ],
        )],
    )
}

fn tape_027_a() -> CassetteSide {
    side(
        "027",
        SideLetter::A,
        Header {
            album_title: "Jazz at the Philharmonic",
            main_artist: "Various Artists",
            genre: "Jazz",
            record_date_display: "1958",
            audio_type: "Mono",
            dolby: "Dolby B",
            tape_selector: "Chrome",
            catalog_number: "VERVE-8269",
        },
        vec![
            session(
                Some("Group A"),
                "September 29, 1958",
                "Carnegie Hall, New York",
                &[
                    ("Dizzy Gillespie", "Trumpet", "1"),
                    ("Stan Getz", "Tenor Sax", "2"),
                    ("Oscar Peterson", "Piano", "3"),
                    ("Ray Brown", "Bass", "4"),
                    ("Herb Ellis", "Guitar", "5"),
                    ("Louie Bellson", "Drums", "6"),
                ],
                vec![
                    track(1, 0, "Cottontail", 8, 15),
                    track(2, 410, "How High the Moon", 11, 32),
                ],
            ),
            session(
                Some("Group B"),
                "September 29, 1958",
                "Carnegie Hall, New York",
                &[
                    ("Roy Eldridge", "Trumpet", "7"),
                    ("Coleman Hawkins", "Tenor Sax", "8"),
                    ("Oscar Peterson", "Piano", "3"),
                    ("Ray Brown", "Bass", "4"),
                    ("Herb Ellis", "Guitar", "5"),
                    ("Louie Bellson", "Drums", "6"),
                ],
                vec![track(3, 1105, "Sweethearts on Parade", 6, 28)],
            ),
        ],
    )
}

fn tape_042_a() -> CassetteSide {
    side(
        "042",
        SideLetter::A,
        Header {
            album_title: "Live at the Village Vanguard",
            main_artist: "John Coltrane Quartet",
            genre: "Jazz",
            record_date_display: "November 1961",
            audio_type: "Stereo",
            dolby: "Dolby C",
            tape_selector: "Metal",
            catalog_number: "IMPULSE-10",
        },
        vec![session(
            None,
            "November 2, 1961",
            "Village Vanguard, New York City",
            &[
                ("John Coltrane", "Tenor Saxophone", "a"),
                ("McCoy Tyner", "Piano", "b"),
                ("Jimmy Garrison", "Bass", "c"),
                ("Elvin Jones", "Drums", "d"),
            ],
            vec![
                track(1, 0, "Spiritual", 12, 45),
                track(2, 638, "Softly, as in a Morning Sunrise", 10, 18),
            ],
        )],
    )
}

fn tape_065_a() -> CassetteSide {
    side(
        "065",
        SideLetter::A,
        Header {
            album_title: "The Complete Louis Armstrong Hot Five & Hot Seven",
            main_artist: "Louis Armstrong",
            genre: "Jazz / Traditional",
            record_date_display: "1925-1928",
            audio_type: "Mono",
            dolby: "None",
            tape_selector: "Normal",
            catalog_number: "COLUMBIA-C4L-19",
        },
        vec![
            session(
                Some("Hot Five - 1926"),
                "February 26, 1926",
                "OKeh Studios, Chicago",
                &[
                    ("Louis Armstrong", "Cornet, Vocals", "LA"),
                    ("Kid Ory", "Trombone", "KO"),
                    ("Johnny Dodds", "Clarinet", "JD"),
                    ("Lil Hardin Armstrong", "Piano", "LH"),
                    ("Johnny St. Cyr", "Banjo", "JS"),
                ],
                vec![
                    track(1, 0, "Muskrat Ramble", 2, 58),
                    with_vocalist(
                        track(2, 148, "Heebie Jeebies", 2, 52),
                        "Voc: Armstrong (scat)",
                    ),
                ],
            ),
            session(
                Some("Hot Seven - 1927"),
                "May 7, 1927",
                "OKeh Studios, Chicago",
                &[
                    ("Louis Armstrong", "Trumpet, Vocals", "LA"),
                    ("John Thomas", "Trombone", "JT"),
                    ("Johnny Dodds", "Clarinet", "JD"),
                    ("Lil Hardin Armstrong", "Piano", "LH"),
                    ("Johnny St. Cyr", "Banjo", "JS"),
                    ("Pete Briggs", "Tuba", "PB"),
                    ("Baby Dodds", "Drums", "BD"),
                ],
                vec![
                    track(3, 295, "Potato Head Blues", 3, 8),
                    track(4, 485, "Weary Blues", 3, 18),
                ],
            ),
        ],
    )
}

fn tape_089_b() -> CassetteSide {
    side(
        "089",
        SideLetter::B,
        Header {
            album_title: "The Freewheelin' Bob Dylan",
            main_artist: "Bob Dylan",
            genre: "Folk",
            record_date_display: "1962-1963",
            audio_type: "Stereo",
            dolby: "Dolby B",
            tape_selector: "Chrome",
            catalog_number: "COLUMBIA-CS-8786",
        },
        vec![session(
            None,
            "April 24, 1963",
            "Columbia Recording Studios, New York",
            &[("Bob Dylan", "Vocals, Guitar, Harmonica", "BD")],
            vec![
                track(1, 0, "Blowin' in the Wind", 2, 48),
                track(2, 140, "Don't Think Twice, It's All Right", 3, 40),
                track(3, 360, "A Hard Rain's A-Gonna Fall", 6, 55),
            ],
        )],
    )
}
