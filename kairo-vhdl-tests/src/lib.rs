#[cfg(test)]
mod tests {
    macro_rules! generated {
        ($name:literal) => {
            include_str!(concat!(env!("OUT_DIR"), "/", $name, ".vhd"))
        };
    }

    fn lines(code: &str) -> Vec<&str> {
        code.lines().map(str::trim).collect()
    }

    fn count(code: &str, line: &str) -> usize {
        lines(code).iter().filter(|l| **l == line).count()
    }

    fn position(code: &str, line: &str) -> usize {
        lines(code)
            .iter()
            .position(|l| *l == line)
            .unwrap_or_else(|| panic!("line {:?} not found in:\n{}", line, code))
    }

    #[test]
    fn passthrough() {
        let code = generated!("passthrough");

        assert!(code.starts_with("library IEEE;\nuse IEEE.std_logic_1164.all;\n"));
        assert_eq!(count(code, "in0 : in std_logic;"), 1);
        assert_eq!(count(code, "out0 : out std_logic"), 1);
        assert_eq!(count(code, "entity \\passthrough\\ is"), 1);
        assert_eq!(count(code, "architecture rtl of \\passthrough\\ is"), 1);
        assert_eq!(count(code, "\\n_c0\\ <= in0;"), 1);
        assert_eq!(count(code, "out0 <= \\n_c0\\;"), 1);
    }

    #[test]
    fn fanout_shares_one_net() {
        let code = generated!("fanout");

        assert_eq!(count(code, "signal \\n_c0\\ : std_logic;"), 1);
        assert!(!code.contains("n_c1"));
        assert!(!code.contains("n_c2"));
        for pin in &["out0", "out1", "out2"] {
            assert_eq!(count(code, &format!("{} <= \\n_c0\\;", pin)), 1);
        }
    }

    #[test]
    fn async_reset_high() {
        let code = generated!("async_reset_high");

        assert_eq!(count(code, "signal \\n_w_q\\ : std_logic := '1';"), 1);
        assert_eq!(
            count(
                code,
                "\\register_r\\ : process (\\n_w_clk\\, \\n_w_rst\\, \\n_w_d\\)"
            ),
            1
        );

        let reset = position(code, "if (\\n_w_rst\\ = '1') then");
        let clock = position(code, "elsif rising_edge(\\n_w_clk\\) then");
        assert!(reset < clock);
        assert_eq!(count(code, "\\n_w_q\\ <= '1';"), 1);
        assert_eq!(count(code, "\\n_w_q\\ <= \\n_w_d\\;"), 1);
    }

    #[test]
    fn sync_reset_low() {
        let code = generated!("sync_reset_low");

        assert_eq!(count(code, "signal \\n_w_q\\ : std_logic := '0';"), 1);

        let clock = position(code, "if rising_edge(\\n_w_clk\\) then");
        let reset = position(code, "if (\\n_w_rst\\ = '0') then");
        let otherwise = position(code, "else");
        assert!(clock < reset);
        assert!(reset < otherwise);
        assert_eq!(count(code, "end if;"), 2);
        assert!(!code.contains("elsif"));
    }

    #[test]
    fn falling_edge() {
        let code = generated!("falling_edge");

        assert_eq!(count(code, "elsif falling_edge(\\n_w_clk\\) then"), 1);
        assert!(!code.contains("rising_edge"));
    }

    #[test]
    fn shift_register() {
        let code = generated!("shift_register");

        assert_eq!(count(code, "signal \\n_w_mid\\ : std_logic := '1';"), 1);
        assert_eq!(count(code, "signal \\n_w_q\\ : std_logic := '0';"), 1);
        assert_eq!(count(code, "signal \\n_w_clk\\ : std_logic;"), 1);
        assert!(!code.contains("n_w_clk1"));
        assert!(!code.contains("n_w_rst1"));
        assert_eq!(code.matches(": process (\\n_w_clk\\, \\n_w_rst\\,").count(), 2);
    }

    #[test]
    fn awkward_names_are_escaped() {
        let code = generated!("awkward_names");

        assert_eq!(count(code, "\\in\\ : in std_logic;"), 1);
        assert_eq!(count(code, "\\data out\\ : out std_logic"), 1);
    }

    #[test]
    fn register_demo() {
        let code = generated!("toggle");

        assert_eq!(count(code, "entity \\toggle\\ is"), 1);
        assert_eq!(count(code, "signal \\n_w_q\\ : std_logic := '1';"), 1);
        let reset = position(code, "if (\\n_w_rst\\ = '1') then");
        let clock = position(code, "elsif rising_edge(\\n_w_clk\\) then");
        assert!(reset < clock);
    }
}
