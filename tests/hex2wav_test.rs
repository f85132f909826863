use std::path::{Path, PathBuf};

use clap::Parser;
use pretty_assertions::assert_eq;
use romconv::{
    hex2wav::{convert, HexToWavArgs},
    kcs::Encoder,
    program::index_line,
};

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    args: HexToWavArgs,
}

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("romconv-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(dir.join("source")).unwrap();
    dir
}

fn args(dir: &Path, extra: &[&str]) -> HexToWavArgs {
    let source = dir.join("source");
    let target = dir.join("target");
    let mut argv = vec![
        "hex2wav".to_owned(),
        "--source".to_owned(),
        source.display().to_string(),
        "--target".to_owned(),
        target.display().to_string(),
    ];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    Cli::parse_from(argv).args
}

/// Samples of a WAV file as unsigned 8-bit values.
fn read_samples(path: &Path) -> Vec<u8> {
    let mut reader = hound::WavReader::open(path).unwrap();
    reader
        .samples::<i8>()
        .map(|s| (s.unwrap() as u8).wrapping_add(128))
        .collect()
}

fn expected_samples(args: &HexToWavArgs, data: &[u8]) -> Vec<u8> {
    let encoder = Encoder::new(&args.kcs_config()).unwrap();
    let mut samples: Vec<u8> = vec![];
    encoder.write_stream(&mut samples, data).unwrap();
    samples
}

#[test]
fn test_convert_directory() {
    let dir = workspace("hex2wav");
    std::fs::write(dir.join("source/PONG.hex"), "00 E0\n1200\n").unwrap();
    std::fs::write(dir.join("source/BLINKY.HEX"), "A2").unwrap();

    let args = args(&dir, &["--leader", "0", "--ihex", "--flat-ihex-copy"]);
    convert(&args).unwrap();

    let target = dir.join("target");
    assert_eq!(
        read_samples(&target.join("wav/P/PONG.wav")),
        expected_samples(&args, &[0x00, 0xE0, 0x12, 0x00])
    );
    assert_eq!(
        read_samples(&target.join("wav/B/BLINKY.wav")),
        expected_samples(&args, &[0xA2])
    );

    let index = std::fs::read_to_string(target.join("wav/Index/Index.txt")).unwrap();
    assert_eq!(
        index,
        format!(
            "{}\n{}\n",
            index_line("BLINKY", "0000 - 0000 (1)"),
            index_line("PONG", "0000 - 0003 (1)")
        )
    );

    let ihex = ":0400000000E012000A\n:00000001FF\n";
    assert_eq!(
        std::fs::read_to_string(target.join("ihex/P/PONG.hex")).unwrap(),
        ihex
    );
    assert_eq!(
        std::fs::read_to_string(target.join("ihex/PONG.hex")).unwrap(),
        ihex
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_convert_with_rom() {
    let dir = workspace("hex2wav-rom");
    std::fs::write(dir.join("source/GAME.hex"), "00E0").unwrap();
    std::fs::write(dir.join("rom.txt"), "AA BB").unwrap();
    let rom = dir.join("rom.txt").display().to_string();

    let args = args(
        &dir,
        &["--leader", "1", "--trailer", "1", "--origin", "0200", "--rom", &rom],
    );
    convert(&args).unwrap();

    let target = dir.join("target");
    let samples = read_samples(&target.join("wav/G/GAME.wav"));
    assert_eq!(samples, expected_samples(&args, &[0xAA, 0xBB, 0x00, 0xE0]));

    let index = std::fs::read_to_string(target.join("wav/Index/Index.txt")).unwrap();
    assert_eq!(index, format!("{}\n", index_line("GAME", "0200 - 0203 (1)")));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_no_wav() {
    let dir = workspace("hex2wav-no-wav");
    std::fs::write(dir.join("source/GAME.hex"), "00E0").unwrap();

    let args = args(&dir, &["--no-wav", "--ihex", "--bytes-per-row", "2"]);
    convert(&args).unwrap();

    let target = dir.join("target");
    assert!(!target.join("wav").exists());
    assert_eq!(
        std::fs::read_to_string(target.join("ihex/G/GAME.hex")).unwrap(),
        ":0200000000E01E\n:00000001FF\n"
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_hex_file() {
    let dir = workspace("hex2wav-invalid");
    std::fs::write(dir.join("source/BAD.hex"), "00 ZZ").unwrap();

    let args = args(&dir, &["--leader", "0"]);
    assert!(convert(&args).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
