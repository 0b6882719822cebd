//! Command-line commands and their argument parsing.

use anyhow::{anyhow, bail, Context, Result};
use teamdex_core::api::RemoteCatalogClient;
use teamdex_core::favorites::FavoriteToggle;
use teamdex_core::models::{
    Algorithm, BossTrainer, CatalogEntry, CatalogKind, EntityKind, RosterMember, Stat,
};
use teamdex_core::roster::RosterOutcome;
use teamdex_core::Teamdex;

pub const USAGE: &str = "\
Usage: teamdex <command>

Commands:
  catalog <kind>                      List a catalog (creatures | items)
  show <kind> <id>                    Show one catalog entry
  favorite <kind> <id>                Toggle a favorite
  favorites <kind>                    List favorites
  roster                              Show the team
  roster add <id>                     Add a creature as a draft
  roster customize <id> [level=<n>] [dvs=<hp,atk,def,spc,spe>] [moves=<m1,m2,m3,m4>]
                        [move<1-4>=<move>]
  roster remove <id>                  Remove a member
  roster clear                        Remove every member
  battle <blue|giovanni|lance> [greedy|dp|dijkstra]
                                      Print the battle request for the team";

/// Changes requested by `roster customize`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customization {
    pub level: Option<i64>,
    pub dvs: Option<Vec<i64>>,
    pub moves: Option<Vec<String>>,
    /// Single-slot edits as (0-based slot, move), applied after `moves`.
    pub slot_moves: Vec<(usize, String)>,
}

impl Customization {
    fn apply(&self, member: &mut RosterMember) {
        if let Some(level) = self.level {
            member.set_level(level);
        }
        if let Some(ref dvs) = self.dvs {
            for (stat, value) in Stat::ALL.iter().zip(dvs) {
                member.set_dv(*stat, *value);
            }
        }
        if let Some(ref moves) = self.moves {
            member.set_moves(moves.iter().cloned());
        }
        for (slot, name) in &self.slot_moves {
            member.set_move(*slot, name);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Catalog(CatalogKind),
    Show(CatalogKind, i64),
    Favorite(CatalogKind, i64),
    Favorites(CatalogKind),
    Roster,
    RosterAdd(i64),
    RosterCustomize(i64, Customization),
    RosterRemove(i64),
    RosterClear,
    Battle(BossTrainer, Algorithm),
}

impl Command {
    /// Parse the arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            [] | ["help"] | ["--help"] | ["-h"] => Ok(Command::Help),
            ["catalog", kind] => Ok(Command::Catalog(parse_kind(kind)?)),
            ["show", kind, id] => Ok(Command::Show(parse_kind(kind)?, parse_id(id)?)),
            ["favorite", kind, id] => Ok(Command::Favorite(parse_kind(kind)?, parse_id(id)?)),
            ["favorites", kind] => Ok(Command::Favorites(parse_kind(kind)?)),
            ["roster"] => Ok(Command::Roster),
            ["roster", "add", id] => Ok(Command::RosterAdd(parse_id(id)?)),
            ["roster", "customize", id, changes @ ..] => Ok(Command::RosterCustomize(
                parse_id(id)?,
                parse_customization(changes)?,
            )),
            ["roster", "remove", id] => Ok(Command::RosterRemove(parse_id(id)?)),
            ["roster", "clear"] => Ok(Command::RosterClear),
            ["battle", boss, rest @ ..] if rest.len() <= 1 => {
                let boss = BossTrainer::parse(boss)
                    .ok_or_else(|| anyhow!("Unknown boss trainer: {boss}"))?;
                let algorithm = match rest.first() {
                    Some(name) => Algorithm::parse(name)
                        .ok_or_else(|| anyhow!("Unknown algorithm: {name}"))?,
                    None => Algorithm::default(),
                };
                Ok(Command::Battle(boss, algorithm))
            }
            _ => bail!("Unrecognized command: {}\n\n{USAGE}", args.join(" ")),
        }
    }
}

fn parse_kind(s: &str) -> Result<CatalogKind> {
    CatalogKind::parse(s).ok_or_else(|| anyhow!("Unknown catalog kind: {s} (use creatures or items)"))
}

fn parse_id(s: &str) -> Result<i64> {
    s.parse()
        .with_context(|| format!("Invalid id: {s}"))
}

fn parse_customization(changes: &[&str]) -> Result<Customization> {
    let mut customization = Customization::default();
    for change in changes {
        let (key, value) = change
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected key=value, got: {change}"))?;
        match key {
            "level" => {
                customization.level = Some(
                    value
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid level: {value}"))?,
                );
            }
            "dvs" => {
                let dvs = value
                    .split(',')
                    .map(|v| {
                        v.trim()
                            .parse::<i64>()
                            .with_context(|| format!("Invalid DV: {v}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                if dvs.len() != Stat::ALL.len() {
                    bail!("dvs needs {} values (hp,atk,def,spc,spe)", Stat::ALL.len());
                }
                customization.dvs = Some(dvs);
            }
            "moves" => {
                customization.moves = Some(value.split(',').map(str::to_string).collect());
            }
            _ => match key.strip_prefix("move").and_then(|n| n.parse::<usize>().ok()) {
                Some(n @ 1..=4) => customization.slot_moves.push((n - 1, value.to_string())),
                _ => bail!("Unknown setting: {key} (use level, dvs, moves or move1-move4)"),
            },
        }
    }
    Ok(customization)
}

pub async fn run<C: RemoteCatalogClient>(command: Command, dex: &Teamdex<C>) -> Result<()> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Catalog(kind) => {
            let entries = dex.catalog(kind).fetch_catalog().await?;
            for entry in &entries {
                println!("{}", format_entry_line(entry));
            }
            println!("{} {kind}", entries.len());
        }
        Command::Show(kind, id) => {
            let entry = find_entry(dex, kind, id).await?;
            let favorite = dex.favorites(kind).contains(id).await?;
            println!("{}", format_entry_detail(&entry, favorite));
        }
        Command::Favorite(kind, id) => {
            let entry = find_entry(dex, kind, id).await?;
            let name = entry.name.clone();
            match dex.favorites(kind).toggle(id, entry).await? {
                FavoriteToggle::Added => println!("Added {name} to favorites"),
                FavoriteToggle::Removed => println!("Removed {name} from favorites"),
            }
        }
        Command::Favorites(kind) => {
            let favorites = dex.favorites(kind).list().await?;
            if favorites.is_empty() {
                println!("No favorite {kind}");
            }
            for favorite in &favorites {
                println!(
                    "{}  (since {})",
                    format_entry_line(&favorite.snapshot),
                    favorite.favorited_at.format("%Y-%m-%d")
                );
            }
        }
        Command::Roster => {
            let roster = dex.roster().list_roster().await?;
            if roster.is_empty() {
                println!("Your team is empty");
            }
            for (position, member) in roster.iter().enumerate() {
                println!("{}. {}", position + 1, format_member(member));
            }
        }
        Command::RosterAdd(id) => {
            let entry = find_entry(dex, CatalogKind::Creatures, id).await?;
            let outcome = dex.roster().add_draft(&entry).await?;
            report(outcome, &entry.name)?;
        }
        Command::RosterCustomize(id, customization) => {
            let mut member = dex
                .roster()
                .get_member(id)
                .await?
                .ok_or_else(|| anyhow!("#{id} is not on your team. Add it first."))?;
            customization.apply(&mut member);
            let name = member.name.clone();
            let outcome = dex.roster().commit_member(member).await?;
            report(outcome, &name)?;
        }
        Command::RosterRemove(id) => {
            if dex.roster().remove_member(id).await? {
                println!("Removed #{id} from your team");
            } else {
                println!("#{id} is not on your team");
            }
        }
        Command::RosterClear => {
            dex.roster().clear_roster().await?;
            println!("Cleared your team");
        }
        Command::Battle(boss, algorithm) => {
            let request = dex
                .roster()
                .battle_request(boss, algorithm)
                .await?
                .map_err(|rejection| anyhow!("{rejection}"))?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }
    Ok(())
}

/// Look up an entry locally, syncing the catalog first if needed.
async fn find_entry<C: RemoteCatalogClient>(
    dex: &Teamdex<C>,
    kind: CatalogKind,
    id: i64,
) -> Result<CatalogEntry> {
    let catalog = dex.catalog(kind);
    if let Some(entry) = catalog.get_entry(id).await? {
        return Ok(entry);
    }
    catalog
        .fetch_catalog()
        .await?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| anyhow!("No {kind} entry with id {id}"))
}

fn report(outcome: RosterOutcome, name: &str) -> Result<()> {
    match outcome {
        RosterOutcome::Added { position } => {
            println!("Added {name} to your team (slot {})", position + 1)
        }
        RosterOutcome::Updated { position } => {
            println!("Updated {name} (slot {})", position + 1)
        }
        RosterOutcome::Rejected(rejection) => bail!("{rejection}"),
    }
    Ok(())
}

fn format_entry_line(entry: &CatalogEntry) -> String {
    match &entry.entity {
        EntityKind::Creature(creature) => {
            format!("#{:03} {:<12} {}", entry.id, entry.name, creature.types.join("/"))
        }
        EntityKind::Item(item) => {
            format!("#{:03} {:<16} {:?} ({}¥)", entry.id, entry.name, item.category, item.cost)
        }
    }
}

fn format_entry_detail(entry: &CatalogEntry, favorite: bool) -> String {
    let star = if favorite { " ★" } else { "" };
    let mut lines = vec![format!("#{:03} {}{star}", entry.id, entry.name)];
    match &entry.entity {
        EntityKind::Creature(creature) => {
            lines.push(format!("Types: {}", creature.types.join("/")));
            let stats: Vec<String> = creature
                .base_stats
                .iter()
                .map(|(stat, value)| format!("{stat} {value}"))
                .collect();
            lines.push(format!("Base stats: {}", stats.join(", ")));
            lines.push(format!("Movepool: {} moves", creature.movepool.len()));
        }
        EntityKind::Item(item) => {
            lines.push(format!("Category: {:?}", item.category));
            lines.push(format!("Cost: {}¥", item.cost));
            lines.push(format!("Effect: {}", item.effect));
            if let Some(heal) = item.heal_amount {
                lines.push(format!("Heals: {heal} HP"));
            }
        }
    }
    lines.join("\n")
}

fn format_member(member: &RosterMember) -> String {
    let mut line = format!("{} (#{}) Lv.{}", member.name, member.id, member.level);
    match member.derived_stats {
        Some(stats) if member.is_customized() => {
            line.push_str(&format!(
                " HP {} | {}",
                stats.hp,
                member.selected_moves.join(", ")
            ));
        }
        _ => line.push_str(" [draft]"),
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_catalog_commands() {
        assert_eq!(
            Command::parse(&args("catalog items")).expect("parse"),
            Command::Catalog(CatalogKind::Items)
        );
        assert_eq!(
            Command::parse(&args("show pokemon 25")).expect("parse"),
            Command::Show(CatalogKind::Creatures, 25)
        );
        assert_eq!(
            Command::parse(&args("favorite creature 4")).expect("parse"),
            Command::Favorite(CatalogKind::Creatures, 4)
        );
        assert!(Command::parse(&args("catalog berries")).is_err());
        assert!(Command::parse(&args("show items abc")).is_err());
    }

    #[test]
    fn test_parse_customize() {
        let command = Command::parse(&args(
            "roster customize 6 level=55 dvs=15,14,13,12,11 moves=tackle,growl,ember,slash",
        ))
        .expect("parse");
        assert_eq!(
            command,
            Command::RosterCustomize(
                6,
                Customization {
                    level: Some(55),
                    dvs: Some(vec![15, 14, 13, 12, 11]),
                    moves: Some(vec![
                        "tackle".to_string(),
                        "growl".to_string(),
                        "ember".to_string(),
                        "slash".to_string()
                    ]),
                    slot_moves: Vec::new(),
                }
            )
        );
    }

    #[test]
    fn test_parse_customize_rejects_bad_settings() {
        assert!(Command::parse(&args("roster customize 6 dvs=1,2,3")).is_err());
        assert!(Command::parse(&args("roster customize 6 shiny=yes")).is_err());
        assert!(Command::parse(&args("roster customize 6 level")).is_err());
        assert!(Command::parse(&args("roster customize 6 move5=tackle")).is_err());
    }

    #[test]
    fn test_parse_single_slot_moves() {
        let command =
            Command::parse(&args("roster customize 1 move2=growl move4=tackle")).expect("parse");
        assert_eq!(
            command,
            Command::RosterCustomize(
                1,
                Customization {
                    slot_moves: vec![(1, "growl".to_string()), (3, "tackle".to_string())],
                    ..Default::default()
                }
            )
        );
    }

    #[test]
    fn test_parse_battle_defaults_to_dijkstra() {
        assert_eq!(
            Command::parse(&args("battle lance")).expect("parse"),
            Command::Battle(BossTrainer::Lance, Algorithm::Dijkstra)
        );
        assert_eq!(
            Command::parse(&args("battle Blue greedy")).expect("parse"),
            Command::Battle(BossTrainer::Blue, Algorithm::Greedy)
        );
        assert!(Command::parse(&args("battle brock")).is_err());
    }

    #[test]
    fn test_customization_clamps_through_member_setters() {
        let entry = CatalogEntry {
            id: 1,
            name: "bulbasaur".to_string(),
            entity: EntityKind::Creature(Default::default()),
        };
        let mut member = RosterMember::draft(&entry).expect("draft");
        Customization {
            level: Some(250),
            dvs: Some(vec![0, 20, -3, 7, 15]),
            moves: Some(vec!["tackle".to_string(), " ".to_string()]),
            slot_moves: vec![(0, "growl".to_string())],
        }
        .apply(&mut member);

        assert_eq!(member.level, 100);
        assert_eq!(member.dvs.attack, 15);
        assert_eq!(member.dvs.defense, 0);
        assert_eq!(member.dvs.special, 7);
        assert_eq!(member.selected_moves, vec!["growl".to_string()]);
    }
}
