mod checkout_restores_file_from_head;
mod checkout_switches_branches;
mod reset_moves_the_branch_pointer;
