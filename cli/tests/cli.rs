use std::fs;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_roster-index"))
}

#[test]
fn missing_inputs_exit_non_zero_with_remediation() {
    let tmp = tempfile::tempdir().unwrap();
    let output = bin()
        .current_dir(tmp.path())
        .args(["--nfl-first-season", "2020", "--nfl-last-season", "2021"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("people.csv"), "{stderr}");
    assert!(stderr.contains("appearances.csv"), "{stderr}");
    assert!(stderr.contains("roster_2020.csv"), "{stderr}");
    assert!(stderr.contains("roster_2021.csv"), "{stderr}");
    assert!(stderr.contains("https://sabr.org/lahman-database/"), "{stderr}");
    assert!(!tmp.path().join("data").exists());
}

#[test]
fn default_run_writes_both_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let lahman = tmp.path().join("lahman");
    let nfl = tmp.path().join("nfl");
    fs::create_dir_all(&lahman).unwrap();
    fs::create_dir_all(&nfl).unwrap();
    fs::write(
        lahman.join("people.csv"),
        "playerID,nameFirst,nameLast\nruthba01,Babe,Ruth\n",
    )
    .unwrap();
    fs::write(
        lahman.join("appearances.csv"),
        "playerID,yearID,teamID\nruthba01,1927,NYA\nruthba01,1919,BOS\n",
    )
    .unwrap();
    fs::write(nfl.join("roster_2020.csv"), "season,team,full_name\n2020,TB,Tom Brady\n").unwrap();

    let status = bin()
        .current_dir(tmp.path())
        .args(["--nfl-first-season", "2020", "--nfl-last-season", "2020"])
        .status()
        .unwrap();
    assert!(status.success());

    let mlb = fs::read_to_string(tmp.path().join("data/mlb_data.json")).unwrap();
    assert_eq!(
        mlb,
        concat!(
            r#"{"players":["Babe Ruth"],"#,
            r#""playerSeasons":{"Babe Ruth":["#,
            r#"{"team":"NYA","year":1927},{"team":"BOS","year":1919}]},"#,
            r#""teamSeasons":{"BOS-1919":["Babe Ruth"],"NYA-1927":["Babe Ruth"]}}"#,
        )
    );
    let nfl_json = fs::read_to_string(tmp.path().join("data/nfl_data.json")).unwrap();
    assert!(nfl_json.contains(r#""TB-2020":["Tom Brady"]"#));
}
