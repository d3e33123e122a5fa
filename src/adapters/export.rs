use crate::domain::model::RankedParticipant;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct LeaderboardRow<'a> {
    rank: u32,
    id: &'a str,
    name: &'a str,
    department: &'a str,
    total_raised: f64,
}

pub fn write_leaderboard_csv<W: Write>(writer: W, ranked: &[RankedParticipant]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in ranked {
        csv_writer.serialize(LeaderboardRow {
            rank: entry.rank,
            id: &entry.participant.id,
            name: &entry.participant.name,
            department: entry.participant.department.as_deref().unwrap_or(""),
            total_raised: entry.participant.total_raised,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn leaderboard_csv(ranked: &[RankedParticipant]) -> Result<String> {
    let mut buffer = Vec::new();
    write_leaderboard_csv(&mut buffer, ranked)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranking::rank;
    use crate::domain::model::Participant;

    #[test]
    fn test_leaderboard_csv() {
        let ranked = rank(&[
            Participant::new("1", "Alex Chen", 1250.0).with_department("Design"),
            Participant::new("2", "Sarah Johnson", 2840.5),
        ]);

        let csv = leaderboard_csv(&ranked).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "rank,id,name,department,total_raised");
        assert_eq!(lines[1], "1,2,Sarah Johnson,,2840.5");
        assert_eq!(lines[2], "2,1,Alex Chen,Design,1250.0");
    }

    #[test]
    fn test_empty_leaderboard_csv() {
        assert_eq!(leaderboard_csv(&[]).unwrap(), "");
    }
}
