use std::path::PathBuf;

use pretty_assertions::assert_eq;
use romconv::bin2hex::{convert, BinToHexArgs};

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("romconv-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(dir.join("source")).unwrap();
    dir
}

#[test]
fn test_convert_directory() {
    let dir = workspace("bin2hex");
    std::fs::write(dir.join("source/PONG.ch8"), [0x00, 0xE0, 0x12, 0x00]).unwrap();
    std::fs::write(dir.join("source/notes.txt"), "not a program").unwrap();

    let args = BinToHexArgs {
        source: dir.join("source"),
        target: dir.join("target"),
        flat_copy: true,
        ihex: true,
        mnemonic: true,
        ..BinToHexArgs::default()
    };
    convert(&args).unwrap();

    let target = dir.join("target");
    let read = |path: &str| std::fs::read_to_string(target.join(path)).unwrap();

    assert_eq!(read("hex/P/PONG.hex"), "00 E0 12 00");
    assert_eq!(read("hex/PONG.hex"), "00 E0 12 00");
    assert_eq!(read("ihex/P/PONG.hex"), ":0400000000E012000A\n:00000001FF\n");
    assert!(!target.join("ihex/PONG.hex").exists());
    assert!(!target.join("hex/n").exists());

    let mnemonic = read("mnemonic/P/PONG.txt");
    let lines = mnemonic.lines().map(str::trim_end).collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "PONG",
            "",
            "Address   Opcode    Mnemonic",
            "0000      00E0      Clear",
            "0002      1200      Goto 200",
        ]
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_convert_relocated_mnemonics() {
    let dir = workspace("bin2hex-relocate");
    std::fs::write(
        dir.join("source/GAME.bin"),
        [0x12, 0x04, 0x60, 0x05, 0xD1, 0x05],
    )
    .unwrap();

    let args = BinToHexArgs {
        source: dir.join("source"),
        target: dir.join("target"),
        no_space: true,
        origin: 0x0200,
        mnemonic: true,
        relocate: Some(0x0600),
        display_adjust: 0x10,
        ..BinToHexArgs::default()
    };
    convert(&args).unwrap();

    let target = dir.join("target");
    assert_eq!(
        std::fs::read_to_string(target.join("hex/G/GAME.hex")).unwrap(),
        "12046005D105"
    );
    let mnemonic = std::fs::read_to_string(target.join("mnemonic/G/GAME.txt")).unwrap();
    let lines = mnemonic.lines().skip(3).map(str::trim_end).collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "0600      1604      Goto 604",
            "0602      6015      V0 = 15",
            "0604      D105      Show 5 at V1, V0",
        ]
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_source_directory() {
    let args = BinToHexArgs {
        source: PathBuf::from("does/not/exist"),
        ..BinToHexArgs::default()
    };
    assert!(convert(&args).is_err());
}
