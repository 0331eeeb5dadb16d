//! Server-rendered HTML pages. Every value coming from the data files goes
//! through `escape` (text) or `segment` (URL path parts) before it is
//! interpolated.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use url::form_urlencoded::byte_serialize;

use crate::store::models::{Player, PlayerKind, Pool, Team};

use super::PoolTeamView;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode one path segment ("Chinese Taipei" → "Chinese%20Taipei").
pub fn segment(s: &str) -> String {
    byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn fmt_f(v: Option<f64>, digits: usize) -> String {
    v.map(|x| format!("{:.*}", digits, x))
        .unwrap_or_else(|| "–".to_string())
}

fn fmt_u(v: Option<u32>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "–".to_string())
}

fn layout(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{title}}", &escape(title))
        .replace("{{body}}", body)
}

// ── Index ────────────────────────────────────────────────────────────────────

pub fn index(pools: &BTreeMap<String, Pool>, loaded_at: DateTime<Utc>) -> String {
    let mut body = String::from("<h1>Pools</h1>");
    if pools.is_empty() {
        body.push_str(r#"<p class="empty">No pools loaded</p>"#);
    }
    for (id, pool) in pools {
        let display = pool.name.clone().unwrap_or_else(|| format!("Pool {}", id));
        body.push_str(&format!(
            r#"<section class="panel"><h2><a href="/pool/{}">{}</a></h2><ul>"#,
            segment(id),
            escape(&display)
        ));
        for team in &pool.teams {
            body.push_str(&format!(
                r#"<li><a href="/team/{}">{}</a></li>"#,
                segment(&team.name),
                escape(&team.name)
            ));
        }
        body.push_str("</ul></section>");
    }
    body.push_str(&format!(
        r#"<p class="muted">Data loaded {}</p>"#,
        loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    layout("Tournament Pools", &body)
}

// ── Pool ─────────────────────────────────────────────────────────────────────

fn bar(label: &str, score: f64) -> String {
    format!(
        r#"<div class="bar-row"><span class="bar-label">{}</span><span class="bar"><span style="width:{:.1}%"></span></span><span class="bar-value">{:.1}</span></div>"#,
        label, score, score
    )
}

pub fn pool(pool_name: &str, teams: &[PoolTeamView]) -> String {
    let mut body = format!("<h1>Pool {}</h1>", escape(pool_name));
    if teams.is_empty() {
        body.push_str(r#"<p class="empty">No teams in this pool</p>"#);
    }
    body.push_str(r#"<div class="cards">"#);
    for t in teams {
        let raw = t.team_stats.unwrap_or_default();
        body.push_str(&format!(
            r#"<section class="panel"><h2><a href="/team/{}">{}</a></h2>
<p class="muted">ERA {} · OPS {} · WHIP {}</p>{}{}{}</section>"#,
            segment(&t.name),
            escape(&t.name),
            fmt_f(raw.era, 2),
            fmt_f(raw.ops, 3),
            fmt_f(raw.whip, 2),
            bar("ERA", t.normalized_stats.era),
            bar("OPS", t.normalized_stats.ops),
            bar("WHIP", t.normalized_stats.whip),
        ));
    }
    body.push_str("</div>");
    if !teams.is_empty() {
        body.push_str(&format!(
            r#"<section class="panel"><h2>Team comparison</h2><canvas id="pool-radar" width="640" height="360" data-pool="{}"></canvas></section>
<script src="/static/js/pool.js"></script>"#,
            escape(pool_name)
        ));
    }
    layout(&format!("Pool {}", pool_name), &body)
}

// ── Team ─────────────────────────────────────────────────────────────────────

fn player_rows(players: &[(&str, &Player)]) -> String {
    if players.is_empty() {
        return r#"<tr><td colspan="3" class="empty">None listed</td></tr>"#.to_string();
    }
    players
        .iter()
        .map(|(id, p)| {
            format!(
                r#"<tr><td><a href="/player/{}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                segment(id),
                escape(&p.name),
                escape(p.position.as_deref().unwrap_or("–")),
                match p.kind {
                    PlayerKind::Pitcher => format!("ERA {}", fmt_f(p.era, 2)),
                    PlayerKind::Batter => format!("OPS {}", fmt_f(p.ops, 3)),
                }
            )
        })
        .collect()
}

pub fn team(
    team_name: &str,
    team: &Team,
    pitchers: &[(&str, &Player)],
    batters: &[(&str, &Player)],
) -> String {
    let stats = team.team_stats.unwrap_or_default();
    let body = format!(
        r#"<h1>{}</h1>
<p class="muted">ERA {} · OPS {} · WHIP {}</p>
<div class="two-col">
<section class="panel"><h2>Pitchers</h2><table><thead><tr><th>Name</th><th>Pos</th><th>Key stat</th></tr></thead><tbody>{}</tbody></table></section>
<section class="panel"><h2>Batters</h2><table><thead><tr><th>Name</th><th>Pos</th><th>Key stat</th></tr></thead><tbody>{}</tbody></table></section>
</div>"#,
        escape(team_name),
        fmt_f(stats.era, 2),
        fmt_f(stats.ops, 3),
        fmt_f(stats.whip, 2),
        player_rows(pitchers),
        player_rows(batters),
    );
    layout(team_name, &body)
}

// ── Player ───────────────────────────────────────────────────────────────────

pub fn player(player: &Player) -> String {
    let team_link = match &player.team {
        Some(t) => format!(r#"<a href="/team/{}">{}</a>"#, segment(t), escape(t)),
        None => "–".to_string(),
    };
    let stats = match player.kind {
        PlayerKind::Batter => format!(
            r#"<table><thead><tr><th>AVG</th><th>OBP</th><th>SLG</th><th>OPS</th></tr></thead>
<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody></table>
<h2>Plate appearance outcomes</h2>
<table><thead><tr><th>1B</th><th>2B</th><th>3B</th><th>HR</th><th>Out</th></tr></thead>
<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody></table>"#,
            fmt_f(player.avg, 3),
            fmt_f(player.obp, 3),
            fmt_f(player.slg, 3),
            fmt_f(player.ops, 3),
            fmt_u(player.singles),
            fmt_u(player.doubles),
            fmt_u(player.triples),
            fmt_u(player.hr),
            fmt_u(player.out),
        ),
        PlayerKind::Pitcher => format!(
            r#"<table><thead><tr><th>ERA</th><th>WHIP</th><th>IP</th><th>SO</th><th>BB</th></tr></thead>
<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody></table>"#,
            fmt_f(player.era, 2),
            fmt_f(player.whip, 2),
            fmt_f(player.ip, 1),
            fmt_u(player.so),
            fmt_u(player.bb),
        ),
    };
    let role = match player.kind {
        PlayerKind::Batter => "Batter",
        PlayerKind::Pitcher => "Pitcher",
    };
    let body = format!(
        r#"<h1>{}</h1><p class="muted">{} · {}</p><section class="panel">{}</section>"#,
        escape(&player.name),
        role,
        team_link,
        stats
    );
    layout(&player.name, &body)
}

pub fn not_found(what: &str) -> String {
    layout(
        "Not found",
        &format!(
            r#"<h1>Not found</h1><p class="empty">{}</p><p><a href="/">Back to pools</a></p>"#,
            escape(what)
        ),
    )
}

// ── Matchup ──────────────────────────────────────────────────────────────────

pub fn matchup(team_names: &[String]) -> String {
    let options: String = team_names
        .iter()
        .map(|n| format!(r#"<option value="{0}">{0}</option>"#, escape(n)))
        .collect();
    let body = MATCHUP_HTML.replace("{{options}}", &options);
    layout("Matchup Predictor", &body)
}

const MATCHUP_HTML: &str = r#"<h1>Matchup Predictor</h1>
<section class="panel">
  <form id="matchup-form">
    <select id="teamA">{{options}}</select>
    <span class="muted">vs</span>
    <select id="teamB">{{options}}</select>
    <button type="submit">Predict</button>
  </form>
  <div id="result" class="result"></div>
</section>
<script>
document.getElementById('matchup-form').addEventListener('submit', async (ev) => {
  ev.preventDefault();
  const out = document.getElementById('result');
  const body = { teamA: document.getElementById('teamA').value, teamB: document.getElementById('teamB').value };
  const r = await fetch('/api/predict', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body) });
  const data = await r.json();
  if (!r.ok) { out.textContent = data.error || ('Request failed: ' + r.status); return; }
  const pct = v => (v * 100).toFixed(0) + '%';
  out.textContent = `${data.teamA.name} ${pct(data.teamA.win_probability)} – ${pct(data.teamB.win_probability)} ${data.teamB.name} · Predicted winner: ${data.winner}`;
});
</script>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{title}}</title>
<link rel="stylesheet" href="/static/css/site.css">
</head>
<body>
<header><a href="/">Pools</a><a href="/matchup">Matchup</a></header>
<main>
{{body}}
</main>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<b>"A&B"</b>'"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;&#39;"
        );
    }

    #[test]
    fn segment_encodes_spaces_as_percent20() {
        assert_eq!(segment("Chinese Taipei"), "Chinese%20Taipei");
        assert_eq!(segment("A+B/C"), "A%2BB%2FC");
    }

    #[test]
    fn matchup_lists_escaped_team_names() {
        let html = matchup(&["Japan".to_string(), "<script>".to_string()]);
        assert!(html.contains(r#"<option value="Japan">Japan</option>"#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<option value=\"<script>\""));
    }
}
