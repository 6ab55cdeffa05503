// Script fixtures with hand-counted tallies

/// Two-line scene from the end-to-end example
pub const ROMEO_TWO_LINES: &str = "  ROMEO. Hello there\n    friend of mine";

/// Hamlet excerpt with stage directions, a malformed header and an orphaned
/// continuation
pub const HAMLET_EXCERPT: &str = "\
ACT III. SCENE I.
A room in the castle.

Enter HAMLET.

  HAMLET. To be, or not to be, that is the question:
    Whether 'tis nobler in the mind to suffer
    The slings and arrows of outrageous fortune,
  Soft you now
    The fair Ophelia!
  OPHELIA. Good my lord,
    How does your honour for this many a day?
  HAMLET. I humbly thank you; well, well, well.

Exeunt.
";

/// Expected tally for HAMLET_EXCERPT
pub const HAMLET_EXPECTED: &[(&str, u64)] = &[("HAMLET", 32), ("OPHELIA", 12)];

/// Romeo and Juliet excerpt sharing ROMEO with ROMEO_TWO_LINES
pub const BALCONY_EXCERPT: &str = "\
Enter ROMEO.

  ROMEO. But soft, what light through yonder window breaks?
    It is the east, and Juliet is the sun.
  JULIET. O Romeo, Romeo, wherefore art thou Romeo?
  ROMEO. Shall I hear more, or shall I speak at this?
";

/// Expected tally for BALCONY_EXCERPT
pub const BALCONY_EXPECTED: &[(&str, u64)] = &[("ROMEO", 27), ("JULIET", 7)];

/// Generate a script of `scenes` identical exchanges between two speakers.
/// Each scene contributes 4 words to FIRST and 7 words to SECOND.
pub fn generate_script(scenes: usize) -> String {
    let mut script = String::new();
    for i in 0..scenes {
        script.push_str(&format!("SCENE {i}.\n"));
        script.push_str("  FIRST. Who goes there?\n");
        script.push_str("    Stand.\n");
        script.push_str("  SECOND. Nay, answer me: stand,\n");
        script.push_str("    and unfold yourself.\n");
        script.push('\n');
    }
    script
}
