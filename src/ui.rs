use crate::config::StorageMode;
use crate::models::default_blocks;

pub fn render_index(week_key: &str, storage: StorageMode) -> String {
    INDEX_HTML
        .replace("{{WEEK}}", &escape_html(week_key))
        .replace("{{STORAGE}}", storage.as_str())
        .replace("{{DEFAULT_BLOCKS}}", &default_blocks_json())
}

fn default_blocks_json() -> String {
    serde_json::to_string(&default_blocks())
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_carries_week_storage_mode_and_defaults() {
        let html = render_index("January 6, 2025 - January 12, 2025", StorageMode::Local);
        assert!(html.contains(r#"<p id="week" class="week">January 6, 2025 - January 12, 2025</p>"#));
        assert!(html.contains(r#"data-storage="local""#));
        assert!(html.contains("Build Your Higher Self"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn chart_labels_are_text_nodes() {
        let html = render_index("January 6, 2025 - January 12, 2025", StorageMode::Remote);
        assert!(html.contains("document.createElementNS('http://www.w3.org/2000/svg', tag)"));
        assert!(html.contains("node.textContent = text;"));
        assert!(!html.contains("innerHTML"));
    }

    #[test]
    fn picking_a_week_moves_the_date_picker_to_its_monday() {
        let html = render_index("January 6, 2025 - January 12, 2025", StorageMode::Remote);
        let start = html.find("getElementById('week-picker').addEventListener").unwrap();
        let handler = &html[start..];
        let handler = &handler[..handler.find("});").unwrap()];
        assert!(handler.contains("type: 'selectWeek'"));
        assert!(handler.contains("split(' - ')[0]"));
        assert!(handler.contains("showDate(monday)"));
    }

    #[test]
    fn week_text_is_escaped() {
        let html = render_index("<b>", StorageMode::Remote);
        assert!(html.contains("&lt;b&gt;"));
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sacred Choices</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f1e8;
      --bg-2: #cfe3d4;
      --ink: #26302b;
      --accent: #2f8f6b;
      --accent-2: #2f4858;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e6efe4 60%, #f5f3ec 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      text-align: center;
      display: grid;
      gap: 6px;
    }

    h1, h2 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
    }

    h1 {
      font-size: clamp(2rem, 4vw, 2.8rem);
    }

    .week {
      font-size: 1.4rem;
      font-weight: 600;
      margin: 8px 0 0;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      justify-content: center;
      align-items: center;
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 12px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      padding: 6px 4px;
      text-align: center;
    }

    th:first-child, td:first-child {
      text-align: left;
    }

    .choice-cell {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    input[type="text"], input[type="date"], select, textarea {
      font: inherit;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 8px 10px;
      background: white;
    }

    .choice-cell input {
      flex: 1;
    }

    textarea {
      width: 100%;
      resize: vertical;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-save {
      background: var(--accent);
      color: white;
      padding: 12px 32px;
    }

    .btn-add {
      background: var(--accent-2);
      color: white;
      justify-self: start;
    }

    .btn-delete {
      background: transparent;
      color: #8b857d;
      padding: 4px 8px;
    }

    .btn-delete:hover {
      color: var(--danger);
    }

    .stats {
      color: #5f5c57;
      margin: 0;
    }

    .day-row {
      display: grid;
      grid-template-columns: 110px 1fr;
      gap: 10px;
      align-items: center;
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-bar {
      fill: rgba(75, 192, 192, 0.35);
      stroke: rgba(75, 192, 192, 1);
      stroke-width: 1;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }
  </style>
</head>
<body data-storage="{{STORAGE}}">
  <main class="app">
    <header>
      <h1>Sacred Choices</h1>
      <h2>Daily Architecture for Optimized Performance</h2>
      <p id="week" class="week">{{WEEK}}</p>
      <p class="week">My Path to Greatness</p>
    </header>

    <section class="toolbar">
      <button class="btn-save" id="save" type="button">Save</button>
      <label for="date-picker">Select Date:</label>
      <input id="date-picker" type="date" />
      <select id="week-picker" aria-label="Saved weeks">
        <option value="">Saved weeks</option>
      </select>
    </section>

    <section class="card">
      <h2>Guiding Principles</h2>
      <textarea id="guiding-principles" rows="10" placeholder="Write your guiding principles here..."></textarea>
    </section>

    <div id="blocks" class="app"></div>

    <section class="card">
      <h2>Progress Overview</h2>
      <svg id="chart" viewBox="0 0 600 260" aria-label="Completion percentage per block" role="img"></svg>
    </section>

    <section class="card">
      <h2>Daily Value Creation</h2>
      <div id="value-creation"></div>
    </section>

    <section class="card">
      <h2>Daily Meditations</h2>
      <div id="meditations"></div>
    </section>

    <section class="card">
      <h2>Daily Affirmations</h2>
      <textarea id="affirmations" rows="10" placeholder="Write your daily affirmations here..."></textarea>
    </section>
  </main>

  <script type="application/json" id="default-blocks">{{DEFAULT_BLOCKS}}</script>
  <script>
    const DAY_SHORT = ['Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat', 'Sun'];
    const DAY_LONG = ['Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday', 'Saturday', 'Sunday'];
    const DEFAULT_BLOCKS = JSON.parse(document.getElementById('default-blocks').textContent);

    const blank = () => Array(7).fill('');

    const weekKeyFor = (date) => {
      const monday = new Date(date);
      monday.setDate(date.getDate() - date.getDay() + 1);
      const sunday = new Date(monday);
      sunday.setDate(monday.getDate() + 6);
      const options = { month: 'long', day: 'numeric', year: 'numeric' };
      return `${monday.toLocaleDateString('en-US', options)} - ${sunday.toLocaleDateString('en-US', options)}`;
    };

    const clone = (value) => JSON.parse(JSON.stringify(value));

    const initialRecord = () => ({
      blocks: clone(DEFAULT_BLOCKS),
      daily_value_creation: blank(),
      daily_meditations: blank(),
      daily_affirmations: '',
      guiding_principles: ''
    });

    // Pure reducer: (state, action) -> next state.
    const reduce = (state, action) => {
      const next = clone(state);
      const record = next.record;
      switch (action.type) {
        case 'addChoice':
          record.blocks[action.block].choices.push({ text: 'New Choice', completions: Array(7).fill(false) });
          break;
        case 'editChoice':
          record.blocks[action.block].choices[action.choice].text = action.text;
          break;
        case 'deleteChoice':
          record.blocks[action.block].choices.splice(action.choice, 1);
          break;
        case 'toggle': {
          const row = record.blocks[action.block].choices[action.choice].completions;
          row[action.day] = !row[action.day];
          break;
        }
        case 'valueCreation':
          record.daily_value_creation[action.day] = action.text;
          break;
        case 'meditation':
          record.daily_meditations[action.day] = action.text;
          break;
        case 'affirmations':
          record.daily_affirmations = action.text;
          break;
        case 'principles':
          record.guiding_principles = action.text;
          break;
        case 'selectDate':
          next.weekKey = weekKeyFor(action.date);
          break;
        case 'selectWeek':
          next.weekKey = action.weekKey;
          break;
        case 'load':
          next.record = clone(action.record);
          break;
        case 'weeks':
          next.weeks = action.weeks.slice();
          break;
      }
      return next;
    };

    const blockStats = (block) => {
      const total = block.choices.reduce((sum, choice) => sum + choice.completions.filter(Boolean).length, 0);
      const cells = block.choices.length * 7;
      return { total, score: cells > 0 ? Math.round((total / cells) * 100) : 0 };
    };

    const labelFor = (name) => name.replace(/^\d+\.\s/, '');

    const remoteStorage = {
      async load(weekKey) {
        const res = await fetch(`/api/data/${encodeURIComponent(weekKey)}`);
        if (!res.ok) {
          throw new Error('Failed to fetch data');
        }
        return res.json();
      },
      async save(weekKey, record) {
        const res = await fetch(`/api/data/${encodeURIComponent(weekKey)}`, {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            blocks: record.blocks,
            guidingPrinciples: record.guiding_principles,
            dailyAffirmations: record.daily_affirmations,
            dailyValueCreation: record.daily_value_creation,
            dailyMeditations: record.daily_meditations
          })
        });
        if (!res.ok) {
          throw new Error('Failed to save data');
        }
        return (await res.json()).message;
      },
      async listWeeks() {
        const res = await fetch('/api/weeks');
        if (!res.ok) {
          throw new Error('Failed to fetch available weeks');
        }
        return res.json();
      }
    };

    // One snapshot for every week: the keys are not scoped by week.
    const localSnapshotStorage = {
      async load() {
        const blocks = localStorage.getItem('blocks');
        const completed = localStorage.getItem('completedChoices');
        const valueCreation = localStorage.getItem('dailyValueCreation');
        if (!blocks || !completed || !valueCreation) {
          return null;
        }
        const rows = JSON.parse(completed);
        return {
          ...initialRecord(),
          blocks: JSON.parse(blocks).map((block, b) => ({
            name: block.name,
            description: block.description,
            choices: block.choices.map((text, c) => ({ text, completions: rows[b][c] }))
          })),
          daily_value_creation: JSON.parse(valueCreation)
        };
      },
      async save(_weekKey, record) {
        localStorage.setItem('blocks', JSON.stringify(record.blocks.map((block) => ({
          name: block.name,
          description: block.description,
          choices: block.choices.map((choice) => choice.text)
        }))));
        localStorage.setItem('completedChoices', JSON.stringify(
          record.blocks.map((block) => block.choices.map((choice) => choice.completions))
        ));
        localStorage.setItem('dailyValueCreation', JSON.stringify(record.daily_value_creation));
        return 'Data saved successfully!';
      },
      async listWeeks() {
        return [];
      }
    };

    const storage = document.body.dataset.storage === 'local' ? localSnapshotStorage : remoteStorage;

    let state = {
      weekKey: document.getElementById('week').textContent,
      record: initialRecord(),
      weeks: []
    };

    const dispatch = (action) => {
      state = reduce(state, action);
      render();
    };

    const el = (tag, props = {}, children = []) => {
      const node = Object.assign(document.createElement(tag), props);
      children.forEach((child) => node.append(child));
      return node;
    };

    const renderBlocks = () => {
      const container = document.getElementById('blocks');
      container.replaceChildren(...state.record.blocks.map((block, b) => {
        const head = el('tr', {}, [el('th', { textContent: 'Sacred Choice' }), ...DAY_SHORT.map((day) => el('th', { textContent: day }))]);
        const rows = block.choices.map((choice, c) => el('tr', {}, [
          el('td', {}, [el('div', { className: 'choice-cell' }, [
            el('input', { type: 'text', value: choice.text, onchange: (e) => dispatch({ type: 'editChoice', block: b, choice: c, text: e.target.value }) }),
            el('button', { className: 'btn-delete', type: 'button', textContent: '✕', onclick: () => dispatch({ type: 'deleteChoice', block: b, choice: c }) })
          ])]),
          ...choice.completions.map((done, d) => el('td', {}, [
            el('input', { type: 'checkbox', checked: done, onchange: () => dispatch({ type: 'toggle', block: b, choice: c, day: d }) })
          ]))
        ]));
        const stats = blockStats(block);
        return el('section', { className: 'card' }, [
          el('h2', { textContent: block.name }),
          el('p', { textContent: block.description }),
          el('table', {}, [el('thead', {}, [head]), el('tbody', {}, rows)]),
          el('button', { className: 'btn-add', type: 'button', textContent: '+ Add Choice', onclick: () => dispatch({ type: 'addChoice', block: b }) }),
          el('p', { className: 'stats', textContent: `Weekly Stats: Total Choices Completed: ${stats.total} · Block Score: ${stats.score}%` })
        ]);
      }));
    };

    const renderDaily = (id, values, type) => {
      document.getElementById(id).replaceChildren(...DAY_LONG.map((day, d) => el('div', { className: 'day-row' }, [
        el('span', { textContent: `${day}:` }),
        el('textarea', { rows: 2, value: values[d] || '', onchange: (e) => dispatch({ type, day: d, text: e.target.value }) })
      ])));
    };

    const svgEl = (tag, attrs = {}, text) => {
      const node = document.createElementNS('http://www.w3.org/2000/svg', tag);
      Object.entries(attrs).forEach(([name, value]) => node.setAttribute(name, value));
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    };

    const renderChart = () => {
      const chart = document.getElementById('chart');
      const width = 600;
      const height = 260;
      const left = 44;
      const bottom = 34;
      const top = 16;
      const plot = height - top - bottom;
      const blocks = state.record.blocks;
      const slot = (width - left * 2) / Math.max(blocks.length, 1);
      const nodes = [];
      for (let tick = 0; tick <= 100; tick += 25) {
        const y = height - bottom - (plot * tick) / 100;
        nodes.push(svgEl('line', { class: 'chart-grid', x1: left, y1: y, x2: width - left, y2: y }));
        nodes.push(svgEl('text', { class: 'chart-label', x: left - 8, y: y + 4, 'text-anchor': 'end' }, String(tick)));
      }
      blocks.forEach((block, index) => {
        const score = blockStats(block).score;
        const barHeight = (plot * score) / 100;
        const x = left + index * slot + slot * 0.2;
        const y = height - bottom - barHeight;
        nodes.push(svgEl('rect', { class: 'chart-bar', x, y, width: slot * 0.6, height: barHeight }));
        nodes.push(svgEl('text', { class: 'chart-label', x: x + slot * 0.3, y: height - bottom + 18, 'text-anchor': 'middle' }, labelFor(block.name)));
      });
      chart.replaceChildren(...nodes);
    };

    const renderWeeks = () => {
      const picker = document.getElementById('week-picker');
      picker.replaceChildren(
        el('option', { value: '', textContent: 'Saved weeks' }),
        ...state.weeks.map((week) => el('option', { value: week, textContent: week, selected: week === state.weekKey }))
      );
    };

    const render = () => {
      document.getElementById('week').textContent = state.weekKey;
      document.getElementById('guiding-principles').value = state.record.guiding_principles;
      document.getElementById('affirmations').value = state.record.daily_affirmations;
      renderBlocks();
      renderDaily('value-creation', state.record.daily_value_creation, 'valueCreation');
      renderDaily('meditations', state.record.daily_meditations, 'meditation');
      renderChart();
      renderWeeks();
    };

    const loadWeek = async () => {
      try {
        const record = await storage.load(state.weekKey);
        if (!record) {
          throw new Error('No data stored for this week');
        }
        dispatch({ type: 'load', record });
      } catch (error) {
        console.error('Error loading data:', error);
        alert('Failed to load data. Please try again.');
      }
    };

    const loadWeeks = async () => {
      try {
        dispatch({ type: 'weeks', weeks: await storage.listWeeks() });
      } catch (error) {
        console.error('Error loading available weeks:', error);
      }
    };

    const save = async () => {
      try {
        const message = await storage.save(state.weekKey, state.record);
        alert(message || 'Data saved successfully!');
        loadWeeks();
      } catch (error) {
        console.error('Error saving data:', error);
        alert('Failed to save data. Please try again.');
      }
    };

    const pad = (n) => String(n).padStart(2, '0');
    const showDate = (date) => {
      document.getElementById('date-picker').value = `${date.getFullYear()}-${pad(date.getMonth() + 1)}-${pad(date.getDate())}`;
    };

    document.getElementById('save').addEventListener('click', save);
    document.getElementById('guiding-principles').addEventListener('change', (e) => dispatch({ type: 'principles', text: e.target.value }));
    document.getElementById('affirmations').addEventListener('change', (e) => dispatch({ type: 'affirmations', text: e.target.value }));
    document.getElementById('date-picker').addEventListener('change', (e) => {
      if (!e.target.value) {
        return;
      }
      const [year, month, day] = e.target.value.split('-').map(Number);
      dispatch({ type: 'selectDate', date: new Date(year, month - 1, day) });
      loadWeek();
    });
    document.getElementById('week-picker').addEventListener('change', (e) => {
      if (!e.target.value) {
        return;
      }
      dispatch({ type: 'selectWeek', weekKey: e.target.value });
      const monday = new Date(e.target.value.split(' - ')[0]);
      if (!Number.isNaN(monday.getTime())) {
        showDate(monday);
      }
      loadWeek();
    });

    const today = new Date();
    showDate(today);
    dispatch({ type: 'selectDate', date: today });
    (async () => {
      await loadWeek();
      await loadWeeks();
    })();
  </script>
</body>
</html>
"#;
