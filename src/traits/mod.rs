pub mod rank_select;
