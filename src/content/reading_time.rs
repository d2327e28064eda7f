use unicode_segmentation::UnicodeSegmentation;

/// Words per minute for an average adult reader.
pub const AVERAGE_ADULT_WPM: usize = 238;

/// Minutes needed to read `content`, rounded up. Empty content reads in zero minutes.
pub fn minutes_to_read(content: &str, wpm: usize) -> usize {
    let wpm = wpm.max(1);
    let word_count = content.unicode_words().count();
    (word_count + wpm - 1) / wpm
}

/// Display label used when a post does not carry its own read time.
pub fn read_time_label(content: &str) -> String {
    let minutes = minutes_to_read(content, AVERAGE_ADULT_WPM).max(1);
    format!("{} min read", minutes)
}
