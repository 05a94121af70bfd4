use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::KeyScriptError;
use crate::input::InputEvent;

lazy_static! {
    /// The hex keypad mapped onto the left four columns of a QWERTY keyboard.
    /// ```text
    /// |1|2|3|C|      |1|2|3|4|
    /// |4|5|6|D|  ->  |Q|W|E|R|
    /// |7|8|9|E|  ->  |A|S|D|F|
    /// |A|0|B|F|      |Z|X|C|V|
    /// ```
    static ref KEYMAP: HashMap<char, u8> = HashMap::from([
        ('1', 0x1),
        ('2', 0x2),
        ('3', 0x3),
        ('4', 0xC),
        ('q', 0x4),
        ('w', 0x5),
        ('e', 0x6),
        ('r', 0xD),
        ('a', 0x7),
        ('s', 0x8),
        ('d', 0x9),
        ('f', 0xE),
        ('z', 0xA),
        ('x', 0x0),
        ('c', 0xB),
        ('v', 0xF),
    ]);
}

pub fn logical_key(key: char) -> Option<u8> {
    KEYMAP.get(&key.to_ascii_lowercase()).copied()
}

/// Parse a key script such as `"30+w,45-w"`: press `w` on frame 30 and
/// release it on frame 45. Entries come back ordered by frame.
pub fn parse_key_script(script: &str) -> Result<Vec<(u64, InputEvent)>, KeyScriptError> {
    let mut events = Vec::new();
    for entry in script.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let split = entry
            .find(|c: char| c == '+' || c == '-')
            .ok_or_else(|| KeyScriptError::Malformed(entry.to_owned()))?;
        let (frame, rest) = entry.split_at(split);
        let frame: u64 = frame
            .trim()
            .parse()
            .map_err(|_| KeyScriptError::Malformed(entry.to_owned()))?;
        let mut chars = rest.chars();
        let direction = chars.next();
        let key = match (chars.next(), chars.next()) {
            (Some(key), None) => key,
            _ => return Err(KeyScriptError::Malformed(entry.to_owned())),
        };
        let key = logical_key(key).ok_or(KeyScriptError::UnmappedKey(key))?;
        let event = match direction {
            Some('+') => InputEvent::KeyDown(key),
            _ => InputEvent::KeyUp(key),
        };
        events.push((frame, event));
    }
    events.sort_by_key(|(frame, _)| *frame);
    Ok(events)
}

#[test]
fn test_keymap() {
    assert_eq!(logical_key('x'), Some(0x0));
    assert_eq!(logical_key('V'), Some(0xF));
    assert_eq!(logical_key('4'), Some(0xC));
    assert_eq!(logical_key('p'), None);
    let mut keys: Vec<u8> = KEYMAP.values().copied().collect();
    keys.sort();
    assert_eq!(keys, (0..16).collect::<Vec<u8>>());
}

#[test]
fn test_parse_key_script() {
    let events = parse_key_script("45-w, 30+w,2+x").unwrap();
    assert_eq!(
        events,
        vec![
            (2, InputEvent::KeyDown(0x0)),
            (30, InputEvent::KeyDown(0x5)),
            (45, InputEvent::KeyUp(0x5)),
        ]
    );
    assert!(parse_key_script("").unwrap().is_empty());
}

#[test]
fn test_parse_key_script_errors() {
    assert!(matches!(
        parse_key_script("10w"),
        Err(KeyScriptError::Malformed(_))
    ));
    assert!(matches!(
        parse_key_script("ten+w"),
        Err(KeyScriptError::Malformed(_))
    ));
    assert!(matches!(
        parse_key_script("10+wq"),
        Err(KeyScriptError::Malformed(_))
    ));
    assert!(matches!(
        parse_key_script("10+p"),
        Err(KeyScriptError::UnmappedKey('p'))
    ));
}
