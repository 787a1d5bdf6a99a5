//! Synthetic transcript generator for stress testing weekpack.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [target]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt "mai ly"

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

const FRIENDS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "村上",
    "محمد",
    "chanti 🎀",
    "User;With;Semicolons",
    "User\"With\"Quotes",
];

const EMOJIS: &[&str] = &["😀", "😂", "🥰", "🤔", "😱", "🔥", "💔", "👍", "🏳️‍🌈", "👨‍👩‍👧‍👦"];

const NOTICES: &[&str] = &[
    "\u{200E}Nachrichten und Anrufe sind Ende-zu-Ende-verschlüsselt. Niemand außerhalb dieses Chats kann sie lesen.",
    "\u{200E}Bild weggelassen",
    "\u{200E}Audio weggelassen",
    "\u{200E}Sticker weggelassen",
    "Diese Nachricht wurde gelöscht.",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_chat.txt", String::as_str);
    let target = args.get(3).map_or("target", String::as_str);

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Target:   {}", target);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let stats = generate(&mut writer, count, target)?;
    writer.flush()?;

    println!("\n\n✅ Done!");
    println!("   Size:    {:.2} MB", stats.bytes as f64 / 1_000_000.0);
    println!("   Target:  {} messages", stats.target_messages);
    println!("   Notices: {}", stats.notices);
    println!("   Time:    {:.2}s", stats.seconds);
    Ok(())
}

struct GenStats {
    bytes: usize,
    target_messages: usize,
    notices: usize,
    seconds: f64,
}

fn generate<W: Write>(writer: &mut W, count: usize, target: &str) -> io::Result<GenStats> {
    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();

    // Start just before a year boundary so ISO week 1 edge cases show up
    let mut ts = NaiveDate::from_ymd_opt(2023, 12, 20)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    let mut stats = GenStats {
        bytes: 0,
        target_messages: 0,
        notices: 0,
        seconds: 0.0,
    };

    for i in 0..count {
        ts += next_gap(&mut rng);

        let is_target = rng.gen_bool(0.2);
        let sender = if is_target {
            stats.target_messages += 1;
            target
        } else {
            FRIENDS.choose(&mut rng).copied().unwrap_or("Alice")
        };

        let body = if i == 0 || rng.gen_ratio(1, 50) {
            stats.notices += 1;
            NOTICES.choose(&mut rng).copied().unwrap_or_default().to_string()
        } else {
            generate_body(&mut rng, i)
        };

        let line = format!("{} {}: {}\n", header_stamp(ts, &mut rng), sender, body);
        stats.bytes += line.len();
        writer.write_all(line.as_bytes())?;

        // Occasionally insert lines the parser has to fold into a message
        if i % 1000 == 500 {
            let garbage = generate_garbage_line(&mut rng);
            stats.bytes += garbage.len();
            writer.write_all(garbage.as_bytes())?;
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                stats.bytes as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    stats.seconds = start.elapsed().as_secs_f64();
    Ok(stats)
}

/// Mostly seconds to minutes apart, sometimes a silent day or week.
fn next_gap(rng: &mut impl Rng) -> Duration {
    match rng.gen_range(0..100) {
        0 => Duration::days(rng.gen_range(7..21)),
        1..=4 => Duration::hours(rng.gen_range(6..48)),
        _ => Duration::seconds(rng.gen_range(1..900)),
    }
}

/// Bracketed most of the time, bare now and then.
fn header_stamp(ts: NaiveDateTime, rng: &mut impl Rng) -> String {
    let stamp = ts.format("%d.%m.%y, %H:%M:%S");
    if rng.gen_ratio(1, 10) {
        stamp.to_string()
    } else {
        format!("[{stamp}]")
    }
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        0..=4 => format!("Normal message #{} with some text", index),
        5 => format!("Message with a colon: here, at 10:30: #{}", index),
        6 => format!("Multi-line message #{}\nsecond line\n\nafter a blank line", index),
        7 => {
            let emojis: String = (0..20)
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("Emoji spam: {} #{}", emojis, index)
        }
        8 => format!("Кириллица: Привет мир! #{}", index),
        9 => format!("日本語: こんにちは #{}", index),
        10 => format!("Quoted header inside: [01.01.24, 00:00:00] x: y #{}", index),
        _ => {
            let padding: String = (0..rng.gen_range(100..2000)).map(|_| 'X').collect();
            format!("Long message #{}: {}", index, padding)
        }
    }
}

fn generate_garbage_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..5) {
        0 => "This line has no timestamp or sender format\n".to_string(),
        1 => "[32.01.24, 10:00:00] Nobody: impossible date\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        3 => "\n".to_string(),
        _ => "[1/15/24, 10:30:45 AM] US style: not a header here\n".to_string(),
    }
}
